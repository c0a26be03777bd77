/// Errors produced while wrapping raw pixel buffers.
#[derive(thiserror::Error, Debug)]
pub enum CoreError {
    #[error("empty or degenerate image (width={width}, height={height})")]
    EmptyImage { width: usize, height: usize },

    #[error("invalid pixel buffer length (expected {expected} bytes, got {got})")]
    InvalidBufferLength { expected: usize, got: usize },
}
