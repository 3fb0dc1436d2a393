//! Semitone to frequency ratio conversion.

/// Semitones per octave.
pub const SEMITONES_PER_OCTAVE: f64 = 12.0;

/// Frequency ratio for a shift of `semitones`.
///
/// `2^(semitones / 12)`: 12 semitones doubles the frequency, -12 halves it.
pub fn ratio(semitones: f64) -> f64 {
    2.0_f64.powf(semitones / SEMITONES_PER_OCTAVE)
}
