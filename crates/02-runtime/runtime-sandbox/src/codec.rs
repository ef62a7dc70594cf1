//! Frame encoding for the sandbox boundary.
//!
//! Every message crosses the boundary as an opaque byte payload behind a small
//! envelope, so each call pays the marshalling cost a foreign-call boundary
//! would.

use crate::protocol::{Reply, Request};
use view_model::{EngineError, EngineResult};

/// Envelope version understood by both sides.
pub const SCHEMA_VERSION_V1: u8 = 1;
/// Envelope tag for caller-to-worker frames.
pub const TAG_REQUEST: u8 = 0x51;
/// Envelope tag for worker-to-caller frames.
pub const TAG_REPLY: u8 = 0x52;

/// Frame header checked before any payload is decoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Envelope {
    /// Message direction.
    pub tag: u8,
    /// Schema version.
    pub ver: u8,
}

impl Envelope {
    /// Builds an envelope.
    pub const fn new(tag: u8, ver: u8) -> Self {
        Self { tag, ver }
    }
}

/// Encoded message as it travels between caller and worker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Header.
    pub envelope: Envelope,
    /// JSON body.
    pub payload: Vec<u8>,
}

impl Frame {
    /// Pairs a header with its body.
    pub fn new(envelope: Envelope, payload: Vec<u8>) -> Self {
        Self { envelope, payload }
    }
}

/// JSON codec for [`Request`] and [`Reply`] frames.
#[derive(Clone, Copy, Debug, Default)]
pub struct SandboxCodec;

impl SandboxCodec {
    /// Encodes a caller request.
    pub fn encode_request(&self, request: &Request) -> EngineResult<Frame> {
        let payload = serde_json::to_vec(request)
            .map_err(|err| EngineError::codec(format!("encode request: {err}")))?;
        Ok(Frame::new(
            Envelope::new(TAG_REQUEST, SCHEMA_VERSION_V1),
            payload,
        ))
    }

    /// Decodes a request frame on the worker.
    pub fn decode_request(&self, frame: &Frame) -> EngineResult<Request> {
        check_envelope(frame.envelope, TAG_REQUEST)?;
        serde_json::from_slice(&frame.payload)
            .map_err(|err| EngineError::codec(format!("decode request: {err}")))
    }

    /// Encodes a worker reply.
    pub fn encode_reply(&self, reply: &Reply) -> EngineResult<Frame> {
        let payload = serde_json::to_vec(reply)
            .map_err(|err| EngineError::codec(format!("encode reply: {err}")))?;
        Ok(Frame::new(Envelope::new(TAG_REPLY, SCHEMA_VERSION_V1), payload))
    }

    /// Decodes a reply frame on the caller.
    pub fn decode_reply(&self, frame: &Frame) -> EngineResult<Reply> {
        check_envelope(frame.envelope, TAG_REPLY)?;
        serde_json::from_slice(&frame.payload)
            .map_err(|err| EngineError::codec(format!("decode reply: {err}")))
    }
}

fn check_envelope(envelope: Envelope, tag: u8) -> EngineResult<()> {
    if envelope.tag != tag || envelope.ver != SCHEMA_VERSION_V1 {
        return Err(EngineError::codec(format!(
            "unexpected envelope tag={:#04x} ver={}",
            envelope.tag, envelope.ver
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_frames_carry_request_envelope() {
        let codec = SandboxCodec;
        let frame = codec
            .encode_request(&Request::SetPage { page: 4 })
            .unwrap();
        assert_eq!(frame.envelope, Envelope::new(TAG_REQUEST, SCHEMA_VERSION_V1));
        assert_eq!(
            codec.decode_request(&frame).unwrap(),
            Request::SetPage { page: 4 }
        );
    }

    #[test]
    fn reply_decoder_rejects_request_frames() {
        let codec = SandboxCodec;
        let frame = codec.encode_request(&Request::NextPage).unwrap();
        assert!(matches!(
            codec.decode_reply(&frame),
            Err(EngineError::Codec(_))
        ));
    }

    #[test]
    fn garbage_payload_is_a_codec_error() {
        let codec = SandboxCodec;
        let frame = Frame::new(Envelope::new(TAG_REPLY, SCHEMA_VERSION_V1), b"{".to_vec());
        assert!(matches!(
            codec.decode_reply(&frame),
            Err(EngineError::Codec(_))
        ));
    }
}
