mod fft;
mod int;

pub use self::int::*;
