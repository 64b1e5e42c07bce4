use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use wavescope_core::SampleBuffer;
use web_sys::{AudioBuffer, AudioContext, File};

/// Copy every channel of a decoded `AudioBuffer` into Rust memory.
pub fn from_audio_buffer(buffer: &AudioBuffer) -> Result<SampleBuffer, String> {
    let channels = (0..buffer.number_of_channels())
        .map(|ch| {
            buffer
                .get_channel_data(ch)
                .map_err(|e| format!("channel {ch} unreadable: {e:?}"))
        })
        .collect::<Result<Vec<_>, _>>()?;
    SampleBuffer::from_channels(channels).map_err(|e| e.to_string())
}

/// Decode an audio file picked by the user with the browser's codecs.
pub async fn decode_file(file: File) -> Result<SampleBuffer, String> {
    let bytes = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("Failed to read {}: {:?}", file.name(), e))?;
    let bytes: js_sys::ArrayBuffer = bytes
        .dyn_into()
        .map_err(|_| "File contents are not an ArrayBuffer".to_string())?;

    let ctx = AudioContext::new().map_err(|e| format!("AudioContext unavailable: {e:?}"))?;
    let promise = ctx
        .decode_audio_data(&bytes)
        .map_err(|e| format!("decodeAudioData failed: {e:?}"))?;
    let decoded = JsFuture::from(promise).await;
    let _ = ctx.close();

    let audio: AudioBuffer = decoded
        .map_err(|e| format!("Could not decode {}: {:?}", file.name(), e))?
        .dyn_into()
        .map_err(|_| "Decoded value is not an AudioBuffer".to_string())?;

    log::debug!(
        "Decoded {}: {} ch, {} frames @ {} Hz",
        file.name(),
        audio.number_of_channels(),
        audio.length(),
        audio.sample_rate()
    );
    from_audio_buffer(&audio)
}
