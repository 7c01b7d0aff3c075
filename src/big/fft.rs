//! Multiplication of digit-group sequences as a polynomial convolution
//! through a complex fast Fourier transform.
//!
//! Both operands are lifted into complex coefficient buffers, zero-padded
//! to the next power of two with room for the double-length product,
//! transformed in place, multiplied point-wise and transformed back. The
//! real parts of the result are rounded to the nearest integer and a
//! final linear pass carries them into radix form.
//!
//! A convolution coefficient is bounded by `min(n, m) * (RADIX - 1)^2`
//! for operands of `n` and `m` groups, and the rounding step is only
//! exact while that bound stays below 2^53. With `RADIX = 10^4` the
//! transform is safe up to roughly 9 * 10^7 groups per operand; beyond
//! that precision would be lost silently, so the bound is part of this
//! module's contract.

use super::int::{Digits, RADIX};

use num_complex::Complex64;
use std::f64::consts::PI;

fn fft(buffer: &mut [Complex64], invert: bool) {
    let n = buffer.len();
    if n == 1 {
        return;
    }

    let log_n = n.trailing_zeros();
    for i in 0..n {
        let j = ((i as u32).reverse_bits() >> (32 - log_n)) as usize;
        if i < j {
            buffer.swap(i, j);
        }
    }

    let mut len = 2;
    while len <= n {
        let angle = 2.0 * PI / len as f64 * if invert { -1.0 } else { 1.0 };
        let wlen = Complex64::new(angle.cos(), angle.sin());
        for start in (0..n).step_by(len) {
            let mut w = Complex64::new(1.0, 0.0);
            for offset in 0..len / 2 {
                let u = buffer[start + offset];
                let v = buffer[start + offset + len / 2] * w;
                buffer[start + offset] = u + v;
                buffer[start + offset + len / 2] = u - v;
                w = w * wlen;
            }
        }
        len <<= 1;
    }

    if invert {
        let scale = 1.0 / n as f64;
        for value in buffer.iter_mut() {
            *value = *value * scale;
        }
    }
}

/// Convolve two little-endian group sequences into the groups of their
/// product, carries propagated and trailing zero groups trimmed.
pub(super) fn convolve(lhs: &[u32], rhs: &[u32]) -> Digits {
    let mut n = 1;
    while n < lhs.len().max(rhs.len()) {
        n <<= 1;
    }
    n <<= 1;

    let mut fa: Vec<Complex64> = lhs
        .iter()
        .map(|&group| Complex64::new(f64::from(group), 0.0))
        .collect();
    let mut fb: Vec<Complex64> = rhs
        .iter()
        .map(|&group| Complex64::new(f64::from(group), 0.0))
        .collect();
    fa.resize(n, Complex64::new(0.0, 0.0));
    fb.resize(n, Complex64::new(0.0, 0.0));

    fft(&mut fa, false);
    fft(&mut fb, false);
    for (x, y) in fa.iter_mut().zip(&fb) {
        *x = *x * *y;
    }
    fft(&mut fa, true);

    let mut digits = Digits::new();
    let mut carry = 0u64;
    for value in &fa {
        let coefficient = (value.re + 0.5) as u64 + carry;
        carry = coefficient / u64::from(RADIX);
        digits.push((coefficient % u64::from(RADIX)) as u32);
    }
    while carry > 0 {
        digits.push((carry % u64::from(RADIX)) as u32);
        carry /= u64::from(RADIX);
    }

    while digits.len() > 1 && digits.last() == Some(&0) {
        digits.pop();
    }
    digits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_groups() {
        assert_eq!(&convolve(&[2], &[3])[..], &[6][..]);
        assert_eq!(&convolve(&[0], &[0])[..], &[0][..]);
        assert_eq!(&convolve(&[9999], &[9999])[..], &[1, 9998][..]);
    }

    #[test]
    fn carries_across_groups() {
        // 10^4 * 10^4 = 10^8
        assert_eq!(&convolve(&[0, 1], &[0, 1])[..], &[0, 0, 1][..]);
        // 99999999^2 = 9999999800000001
        assert_eq!(
            &convolve(&[9999, 9999], &[9999, 9999])[..],
            &[1, 0, 9998, 9999][..]
        );
    }

    #[test]
    fn uneven_lengths() {
        // 123456789 * 11 = 1358024679
        assert_eq!(
            &convolve(&[6789, 2345, 1], &[11])[..],
            &[4679, 5802, 13][..]
        );
    }
}
