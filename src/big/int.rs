use super::fft;

use num_traits::*;
use smallvec::SmallVec;
use std::{
    cmp::Ordering,
    fmt,
    iter,
    mem,
    ops::*,
    str::FromStr,
};
use thiserror::Error;

/// Decimal digits per stored group.
pub const GROUP_WIDTH: usize = 4;
/// The radix of one stored group, `10^GROUP_WIDTH`.
pub const RADIX: u32 = 10_000;

pub(crate) type Digits = SmallVec<[u32; 8]>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sign {
    Negative,
    Positive,
}
impl Default for Sign {
    fn default() -> Self {
        Sign::Positive
    }
}
impl Neg for Sign {
    type Output = Self;
    fn neg(self) -> Self::Output {
        match self {
            Sign::Negative => Sign::Positive,
            Sign::Positive => Sign::Negative,
        }
    }
}
impl Mul for Sign {
    type Output = Self;
    fn mul(self, other: Self) -> Self::Output {
        if self == other {
            Sign::Positive
        } else {
            Sign::Negative
        }
    }
}

/// Errors reported when a decimal literal cannot be read.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseBigIntError {
    #[error("cannot parse integer from empty string")]
    Empty,
    #[error("invalid digit {0:?} in decimal literal")]
    InvalidDigit(char),
    #[error("unsupported radix {0}, only base 10 is available")]
    UnsupportedRadix(u32),
}

/// A signed integer of unbounded size, stored as little-endian groups of
/// `GROUP_WIDTH` decimal digits. The zero value is a single zero group
/// and always carries a positive sign.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BigInt {
    sign: Sign,
    digits: Digits,
}
impl Default for BigInt {
    fn default() -> Self {
        Self::zero()
    }
}
impl BigInt {
    /// Alias of `from`
    pub fn new<T: Into<Self>>(value: T) -> Self {
        value.into()
    }
    /// Return the sign
    pub fn sign(&self) -> Sign {
        self.sign
    }
    /// Borrow the digit groups, least significant first
    pub fn groups(&self) -> &[u32] {
        &self.digits
    }
    /// Return the number of digit groups
    pub fn group_count(&self) -> usize {
        self.digits.len()
    }

    pub(crate) fn set_sign(&mut self, sign: Sign) {
        self.sign = if self.is_zero() { Sign::Positive } else { sign };
    }
    pub(crate) fn pow10(exponent: usize) -> Self {
        let mut digits = Digits::new();
        digits.extend(iter::repeat(0).take(exponent / GROUP_WIDTH));
        digits.push(10u32.pow((exponent % GROUP_WIDTH) as u32));
        Self {
            sign: Sign::Positive,
            digits,
        }
    }

    fn trim(digits: &mut Digits) {
        while digits.len() > 1 && digits.last() == Some(&0) {
            digits.pop();
        }
    }
    /// Converts a run of ASCII digits into canonical groups. Callers
    /// validate the bytes first.
    fn decimal_groups(bytes: &[u8]) -> Digits {
        let mut digits = Digits::new();
        let mut end = bytes.len();
        while end > 0 {
            let start = end.saturating_sub(GROUP_WIDTH);
            let mut group = 0;
            for &byte in &bytes[start..end] {
                group = group * 10 + <u32 as From<u8>>::from(byte - b'0');
            }
            digits.push(group);
            end = start;
        }
        if digits.is_empty() {
            digits.push(0);
        }
        Self::trim(&mut digits);
        digits
    }

    fn magnitude_cmp(lhs: &[u32], rhs: &[u32]) -> Ordering {
        lhs.len()
            .cmp(&rhs.len())
            .then_with(|| lhs.iter().rev().cmp(rhs.iter().rev()))
    }

    fn add_magnitude(&mut self, other: &[u32]) {
        if other.len() > self.digits.len() {
            self.digits
                .extend(iter::repeat(0).take(other.len() - self.digits.len()));
        }
        let mut carry = 0;
        for (i, digit) in self.digits.iter_mut().enumerate() {
            let sum = *digit + other.get(i).copied().unwrap_or(0) + carry;
            *digit = sum % RADIX;
            carry = sum / RADIX;
        }
        if carry > 0 {
            self.digits.push(carry);
        }
    }
    /// The minuend's magnitude must not be smaller than `other`.
    fn sub_magnitude(digits: &mut Digits, other: &[u32]) {
        let mut borrow = 0;
        for (i, digit) in digits.iter_mut().enumerate() {
            let take = other.get(i).copied().unwrap_or(0) + borrow;
            if *digit < take {
                *digit += RADIX - take;
                borrow = 1;
            } else {
                *digit -= take;
                borrow = 0;
            }
        }
        Self::trim(digits);
    }

    fn div10(&mut self) {
        let mut carry = 0;
        for digit in self.digits.iter_mut().rev() {
            let current = *digit + carry * RADIX;
            *digit = current / 10;
            carry = current % 10;
        }
        Self::trim(&mut self.digits);
    }

    /// Performs division and remainder in one step, or returns `None`
    /// when `other` is zero. The quotient truncates toward zero and a
    /// nonzero remainder keeps the dividend's sign.
    pub fn div_rem(&self, other: &Self) -> Option<(Self, Self)> {
        if other.is_zero() {
            return None;
        }
        if other.digits.len() > self.digits.len() {
            return Some((Self::zero(), self.clone()));
        }
        let quotient_sign = self.sign * other.sign;

        let mut remainder = self.clone();
        remainder.sign = Sign::Positive;

        // The divisor is aligned by appending decimal digits, not whole
        // groups, so the quotient comes out one decimal digit at a time.
        let shift = (self.digits.len() - other.digits.len() + 1) * GROUP_WIDTH;
        let mut padded = other.abs().to_string();
        padded.extend(iter::repeat('0').take(shift));
        let mut shifted = Self {
            sign: Sign::Positive,
            digits: Self::decimal_groups(padded.as_bytes()),
        };

        let mut quotient = String::with_capacity(shift + 1);
        for _ in 0..=shift {
            let mut digit = 0u8;
            while digit < 9
                && Self::magnitude_cmp(&remainder.digits, &shifted.digits) != Ordering::Less
            {
                Self::sub_magnitude(&mut remainder.digits, &shifted.digits);
                digit += 1;
            }
            quotient.push(char::from(b'0' + digit));
            shifted.div10();
        }

        let mut quotient = Self {
            sign: quotient_sign,
            digits: Self::decimal_groups(quotient.as_bytes()),
        };
        if quotient.is_zero() {
            quotient.sign = Sign::Positive;
        }
        remainder.sign = if remainder.is_zero() {
            Sign::Positive
        } else {
            self.sign
        };
        Some((quotient, remainder))
    }
}

/// Find the greatest common divisor of two numbers with the Euclidean
/// algorithm. The result is never negative.
pub fn gcd(mut x: BigInt, mut y: BigInt) -> BigInt {
    x.set_sign(Sign::Positive);
    y.set_sign(Sign::Positive);
    while !y.is_zero() {
        x %= &y;
        mem::swap(&mut x, &mut y);
    }
    x
}

impl<T: Into<i128>> From<T> for BigInt {
    fn from(value: T) -> Self {
        let value = value.into();
        let sign = if value < 0 {
            Sign::Negative
        } else {
            Sign::Positive
        };
        let mut magnitude = value.wrapping_abs() as u128;
        let mut digits = Digits::new();
        loop {
            digits.push((magnitude % <u128 as From<u32>>::from(RADIX)) as u32);
            magnitude /= <u128 as From<u32>>::from(RADIX);
            if magnitude == 0 {
                break;
            }
        }
        Self { sign, digits }
    }
}

impl FromStr for BigInt {
    type Err = ParseBigIntError;
    fn from_str(mut input: &str) -> Result<Self, Self::Err> {
        let sign = if input.starts_with('-') {
            input = &input[1..];
            Sign::Negative
        } else {
            Sign::Positive
        };
        let bytes = input.as_bytes();
        if bytes.is_empty() {
            return Err(ParseBigIntError::Empty);
        }
        if let Some(&bad) = bytes.iter().find(|byte| !byte.is_ascii_digit()) {
            return Err(ParseBigIntError::InvalidDigit(char::from(bad)));
        }
        let mut result = Self {
            sign,
            digits: Self::decimal_groups(bytes),
        };
        if result.is_zero() {
            result.sign = Sign::Positive;
        }
        Ok(result)
    }
}

impl Num for BigInt {
    type FromStrRadixErr = ParseBigIntError;

    fn from_str_radix(input: &str, radix: u32) -> Result<Self, Self::FromStrRadixErr> {
        if radix != 10 {
            return Err(ParseBigIntError::UnsupportedRadix(radix));
        }
        input.parse()
    }
}
impl Zero for BigInt {
    fn zero() -> Self {
        let mut digits = Digits::new();
        digits.push(0);
        Self {
            sign: Sign::Positive,
            digits,
        }
    }
    fn is_zero(&self) -> bool {
        self.digits.len() == 1 && self.digits[0] == 0
    }
}
impl One for BigInt {
    fn one() -> Self {
        let mut digits = Digits::new();
        digits.push(1);
        Self {
            sign: Sign::Positive,
            digits,
        }
    }
    fn is_one(&self) -> bool {
        self.sign == Sign::Positive && self.digits.len() == 1 && self.digits[0] == 1
    }
}
impl Signed for BigInt {
    fn abs(&self) -> Self {
        let mut copy = self.clone();
        copy.sign = Sign::Positive;
        copy
    }
    fn abs_sub(&self, other: &Self) -> Self {
        if self <= other {
            Self::zero()
        } else {
            self.clone() - other
        }
    }
    fn signum(&self) -> Self {
        if self.is_zero() {
            Self::zero()
        } else if self.is_positive() {
            Self::one()
        } else {
            -Self::one()
        }
    }
    fn is_positive(&self) -> bool {
        !self.is_zero() && self.sign == Sign::Positive
    }
    fn is_negative(&self) -> bool {
        self.sign == Sign::Negative
    }
}

impl Neg for BigInt {
    type Output = Self;
    fn neg(mut self) -> Self::Output {
        if !self.is_zero() {
            self.sign = -self.sign;
        }
        self
    }
}
impl CheckedNeg for BigInt {
    fn checked_neg(&self) -> Option<Self> {
        Some(-self.clone())
    }
}

impl AddAssign<&Self> for BigInt {
    fn add_assign(&mut self, other: &Self) {
        if self.sign == other.sign {
            self.add_magnitude(&other.digits);
        } else {
            if Self::magnitude_cmp(&self.digits, &other.digits) == Ordering::Less {
                let mut larger = other.digits.clone();
                Self::sub_magnitude(&mut larger, &self.digits);
                self.digits = larger;
                self.sign = other.sign;
            } else {
                Self::sub_magnitude(&mut self.digits, &other.digits);
            }
            if self.is_zero() {
                self.sign = Sign::Positive;
            }
        }
    }
}
impl SubAssign<&Self> for BigInt {
    fn sub_assign(&mut self, other: &Self) {
        *self += &-other.clone();
    }
}
impl MulAssign<&Self> for BigInt {
    fn mul_assign(&mut self, other: &Self) {
        let sign = self.sign * other.sign;
        self.digits = fft::convolve(&self.digits, &other.digits);
        self.sign = if self.is_zero() { Sign::Positive } else { sign };
    }
}
impl DivAssign<&Self> for BigInt {
    fn div_assign(&mut self, other: &Self) {
        let (quotient, _) = self.div_rem(other).expect("division by zero");
        *self = quotient;
    }
}
impl RemAssign<&Self> for BigInt {
    fn rem_assign(&mut self, other: &Self) {
        let (_, remainder) = self.div_rem(other).expect("division by zero");
        *self = remainder;
    }
}

impl CheckedAdd for BigInt {
    fn checked_add(&self, other: &Self) -> Option<Self> {
        Some(self.clone() + other)
    }
}
impl CheckedSub for BigInt {
    fn checked_sub(&self, other: &Self) -> Option<Self> {
        Some(self.clone() - other)
    }
}
impl CheckedMul for BigInt {
    fn checked_mul(&self, other: &Self) -> Option<Self> {
        Some(self.clone() * other)
    }
}
impl CheckedDiv for BigInt {
    fn checked_div(&self, other: &Self) -> Option<Self> {
        self.div_rem(other).map(|(quotient, _)| quotient)
    }
}
impl CheckedRem for BigInt {
    fn checked_rem(&self, other: &Self) -> Option<Self> {
        self.div_rem(other).map(|(_, remainder)| remainder)
    }
}

impl Ord for BigInt {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.sign, other.sign) {
            (Sign::Negative, Sign::Positive) => Ordering::Less,
            (Sign::Positive, Sign::Negative) => Ordering::Greater,
            (sign, _) => {
                let magnitude = Self::magnitude_cmp(&self.digits, &other.digits);
                if sign == Sign::Negative {
                    magnitude.reverse()
                } else {
                    magnitude
                }
            }
        }
    }
}
impl PartialOrd for BigInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Index<usize> for BigInt {
    type Output = u32;
    fn index(&self, group: usize) -> &u32 {
        &self.digits[group]
    }
}

impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.sign == Sign::Negative {
            write!(f, "-")?;
        } else if f.sign_plus() {
            write!(f, "+")?;
        }
        let mut groups = self.digits.iter().rev();
        if let Some(leading) = groups.next() {
            write!(f, "{}", leading)?;
        }
        for group in groups {
            write!(f, "{:0width$}", group, width = GROUP_WIDTH)?;
        }
        Ok(())
    }
}
impl fmt::Debug for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

macro_rules! impl_op {
    ($($op_trait:ident $op_fn:ident = $assign_trait:ident $assign_fn:ident),*) => {
        $(
            impl $op_trait<&Self> for BigInt {
                type Output = Self;
                fn $op_fn(mut self, other: &Self) -> Self::Output {
                    self.$assign_fn(other);
                    self
                }
            }
            impl<T: Into<Self>> $op_trait<T> for BigInt {
                type Output = Self;
                fn $op_fn(mut self, other: T) -> Self::Output {
                    self.$assign_fn(&other.into());
                    self
                }
            }
            impl<T: Into<Self>> $assign_trait<T> for BigInt {
                fn $assign_fn(&mut self, other: T) {
                    self.$assign_fn(&other.into());
                }
            }
        )*
    }
}
impl_op! {
    Add add = AddAssign add_assign,
    Sub sub = SubAssign sub_assign,
    Mul mul = MulAssign mul_assign,
    Div div = DivAssign div_assign,
    Rem rem = RemAssign rem_assign
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(s: &str) -> BigInt {
        s.parse().unwrap()
    }

    #[test]
    fn sign_combination() {
        assert_eq!(Sign::Positive * Sign::Positive, Sign::Positive);
        assert_eq!(Sign::Negative * Sign::Negative, Sign::Positive);
        assert_eq!(Sign::Negative * Sign::Positive, Sign::Negative);
        assert_eq!(-Sign::Negative, Sign::Positive);
    }

    #[test]
    fn parse_and_format() {
        assert_eq!(big("0").to_string(), "0");
        assert_eq!(big("-0").to_string(), "0");
        assert_eq!(big("000123").to_string(), "123");
        assert_eq!(big("12345678901234567890").to_string(), "12345678901234567890");
        assert_eq!(big("-987654321").to_string(), "-987654321");
        assert_eq!(format!("{:+}", big("42")), "+42");
        assert_eq!(BigInt::new(-10000).to_string(), "-10000");
        assert_eq!(
            BigInt::new(std::i128::MIN).to_string(),
            "-170141183460469231731687303715884105728"
        );
        assert_eq!("".parse::<BigInt>(), Err(ParseBigIntError::Empty));
        assert_eq!("-".parse::<BigInt>(), Err(ParseBigIntError::Empty));
        assert_eq!("12a4".parse::<BigInt>(), Err(ParseBigIntError::InvalidDigit('a')));
        assert_eq!("+5".parse::<BigInt>(), Err(ParseBigIntError::InvalidDigit('+')));
        assert_eq!(
            BigInt::from_str_radix("ff", 16),
            Err(ParseBigIntError::UnsupportedRadix(16))
        );
        assert_eq!(BigInt::from_str_radix("-42", 10).unwrap(), BigInt::new(-42));
    }

    #[test]
    fn round_trip() {
        for value in &[
            "0",
            "7",
            "-7",
            "9999",
            "10000",
            "10001",
            "123456789123456789",
            "-100000000000000000001",
        ] {
            assert_eq!(big(value).to_string(), *value);
        }
    }

    #[test]
    fn canonical_zero() {
        let zero = big("5") - big("5");
        assert_eq!(zero.groups(), &[0][..]);
        assert_eq!(zero.sign(), Sign::Positive);
        assert_eq!((-BigInt::zero()).sign(), Sign::Positive);
        assert_eq!(BigInt::new(-7) + 7, BigInt::zero());
        assert_eq!((big("-12") * big("0")).sign(), Sign::Positive);
    }

    #[test]
    fn groups_view() {
        let x = big("123456789");
        assert_eq!(x.groups(), &[6789, 2345, 1][..]);
        assert_eq!(x.group_count(), 3);
        assert_eq!(x[0], 6789);
        assert_eq!(x[2], 1);
    }

    #[test]
    fn add_sub() {
        assert_eq!(big("999") + big("1"), big("1000"));
        assert_eq!(big("9999") + big("1"), big("10000"));
        assert_eq!(BigInt::new(1) - 5, BigInt::new(-4));
        assert_eq!(BigInt::new(-2) + 1, BigInt::new(-1));
        assert_eq!(BigInt::new(-2) + -1, BigInt::new(-3));
        assert_eq!(big("10000000000000000000") + big("1"), big("10000000000000000001"));
        for i in -12i64..13 {
            for j in -12i64..13 {
                let (x, y) = (i * 99_999, j * 101_011);
                assert_eq!(BigInt::new(x) + BigInt::new(y), BigInt::new(x + y));
                assert_eq!(BigInt::new(x) - BigInt::new(y), BigInt::new(x - y));
            }
        }
    }

    #[test]
    fn increment_decrement() {
        let mut x = big("999");
        x += 1;
        assert_eq!(x, big("1000"));
        x -= 1;
        assert_eq!(x, big("999"));
    }

    #[test]
    fn mul() {
        assert_eq!(big("123456789") * big("987654321"), big("121932631112635269"));
        assert_eq!(
            big("999999999999999999") * big("999999999999999999"),
            big("999999999999999998000000000000000001")
        );
        assert_eq!(big("-3") * big("3"), big("-9"));
        assert_eq!(big("-3") * big("-3"), big("9"));
        assert_eq!(big("0") * big("-12345678901234567890"), BigInt::zero());
        for i in -12i64..13 {
            for j in -12i64..13 {
                let (x, y) = (i * 123_456_789, j * 987_654_321);
                assert_eq!(
                    BigInt::new(x) * BigInt::new(y),
                    BigInt::new(<i128 as From<i64>>::from(x) * <i128 as From<i64>>::from(y))
                );
            }
        }
    }

    #[test]
    fn div() {
        assert_eq!(big("-7") / big("2"), big("-3"));
        assert_eq!(big("-7") % big("2"), big("-1"));
        assert_eq!(big("7") / big("-2"), big("-3"));
        assert_eq!(big("7") % big("-2"), big("1"));
        assert_eq!(big("246") / big("2"), big("123"));
        assert_eq!(big("10000") / big("2"), big("5000"));
        assert_eq!(big("5") / big("7"), BigInt::zero());
        assert_eq!(big("5") % big("7"), big("5"));
    }

    #[test]
    fn div_rem_matches_native() {
        let values = [
            -1_000_000_007i64,
            -100_000,
            -9_999,
            -128,
            -1,
            0,
            1,
            2,
            9,
            10_000,
            65_535,
            99_999_999,
            12_345_678_901,
        ];
        for &x in &values {
            for &y in &values {
                if y == 0 {
                    assert_eq!(BigInt::new(x).div_rem(&BigInt::new(y)), None);
                    continue;
                }
                let (q, r) = BigInt::new(x).div_rem(&BigInt::new(y)).unwrap();
                assert_eq!(q, BigInt::new(x / y), "{} / {}", x, y);
                assert_eq!(r, BigInt::new(x % y), "{} % {}", x, y);
            }
        }
    }

    #[test]
    fn div_rem_identity_large() {
        let a = big("123456789012345678901234567890123456789");
        let b = big("987654321098765432109876543");
        let (q, r) = a.div_rem(&b).unwrap();
        assert_eq!(q.clone() * &b + &r, a);
        assert!(r.abs() < b.abs());
        assert!(!q.is_zero());
    }

    #[test]
    #[should_panic]
    fn divide_by_zero() {
        let _ = big("5") / BigInt::zero();
    }

    #[test]
    fn checked() {
        assert_eq!(big("5").checked_div(&BigInt::zero()), None);
        assert_eq!(big("5").checked_rem(&BigInt::zero()), None);
        assert_eq!(big("5").checked_div(&big("2")), Some(big("2")));
        assert_eq!(big("5").checked_rem(&big("2")), Some(big("1")));
    }

    #[test]
    fn ordering() {
        assert!(big("-5") < big("-3"));
        assert!(big("-3") < big("0"));
        assert!(big("0") < big("3"));
        assert!(big("-10000") < big("-9999"));
        assert!(big("9999") < big("10000"));
        assert!(big("-100000000000000") < big("5"));
        assert_eq!(big("42").cmp(&big("42")), Ordering::Equal);
    }

    #[test]
    fn signum_abs() {
        assert_eq!(big("-5").abs(), big("5"));
        assert_eq!(big("-5").signum(), big("-1"));
        assert_eq!(big("5").signum(), big("1"));
        assert_eq!(BigInt::zero().signum(), BigInt::zero());
        assert!(big("-5").is_negative());
        assert!(!BigInt::zero().is_positive());
    }

    #[test]
    fn gcd_fn() {
        assert_eq!(gcd(big("54"), big("24")), big("6"));
        assert_eq!(gcd(big("-54"), big("24")), big("6"));
        assert_eq!(gcd(big("0"), big("7")), big("7"));
        assert_eq!(gcd(big("7"), big("0")), big("7"));
        assert_eq!(gcd(big("270"), big("192")), big("6"));
    }
}
