//! Library half of the `markword` binary: the inspect transforms.

pub mod transforms;
