use consilium_gateway::STUB_TRANSCRIPT_SENTINEL;
use consilium_models::Transcript;

/// Placeholder text for a successful transcription that heard nothing.
/// Downstream treats it as transcript content, not as an error.
pub const NO_SPEECH_PLACEHOLDER: &str = "[No speech detected]";

/// Normalizes raw transcript text from any source (speech backend or manual
/// entry).
///
/// Blank input and the stub sentinel collapse to the empty transcript, so an
/// empty `Transcript` downstream always means "nothing usable"; all other
/// text passes through unmodified.
pub fn normalize(raw: &str) -> Transcript {
    if raw.trim().is_empty() || raw.contains(STUB_TRANSCRIPT_SENTINEL) {
        return Transcript::empty();
    }
    Transcript::new(raw)
}
