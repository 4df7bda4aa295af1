use crate::{Error, Result};

/// The pieces of a WAV upload the recognizer needs: the declared sample
/// rate and the raw PCM payload.
#[derive(Debug, PartialEq)]
pub struct WavAudio<'a> {
    pub sample_rate: u32,
    pub data: &'a [u8],
}

/// Minimal RIFF/WAVE reader. Walks the chunk list for `fmt ` and `data`;
/// anything else (compression headers, cue points) is skipped unparsed.
pub fn parse_wav(bytes: &[u8]) -> Result<WavAudio<'_>> {
    if bytes.len() < 12 || &bytes[0..4] != b"RIFF" || &bytes[8..12] != b"WAVE" {
        return Err(Error::speech("audio is not a RIFF/WAVE stream"));
    }

    let mut sample_rate = None;
    let mut data = None;
    let mut offset = 12;

    while offset + 8 <= bytes.len() {
        let chunk_id = &bytes[offset..offset + 4];
        let chunk_size = u32::from_le_bytes([
            bytes[offset + 4],
            bytes[offset + 5],
            bytes[offset + 6],
            bytes[offset + 7],
        ]) as usize;

        let body_start = offset + 8;
        let body_end = body_start + chunk_size;
        if body_end > bytes.len() {
            return Err(Error::speech("truncated WAVE chunk"));
        }

        match chunk_id {
            b"fmt " => {
                if chunk_size < 8 {
                    return Err(Error::speech("malformed WAVE format chunk"));
                }
                sample_rate = Some(u32::from_le_bytes([
                    bytes[body_start + 4],
                    bytes[body_start + 5],
                    bytes[body_start + 6],
                    bytes[body_start + 7],
                ]));
            }
            b"data" => {
                data = Some(&bytes[body_start..body_end]);
            }
            _ => {}
        }

        // Chunks are word-aligned
        offset = body_end + (chunk_size & 1);
    }

    match (sample_rate, data) {
        (Some(sample_rate), Some(data)) => Ok(WavAudio { sample_rate, data }),
        _ => Err(Error::speech("WAVE stream is missing fmt or data chunk")),
    }
}
