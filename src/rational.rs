use crate::{gcd, BigInt, ParseBigIntError, Sign};

use num_traits::{One, Zero};
use std::{
    cmp::Ordering,
    fmt,
    mem,
    ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign},
    str::FromStr,
};
use thiserror::Error;

/// Errors reported when a fraction literal cannot be read.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseRationalError {
    #[error(transparent)]
    Invalid(#[from] ParseBigIntError),
    #[error("denominator is 0")]
    ZeroDenominator,
}

/// A number stored in fraction form instead of actually calculating the
/// result. This ensures (10/3) * 3 is exactly 10 and not 9.99998.
///
/// The numerator and denominator are kept positive and coprime, with the
/// sign carried separately; the zero value is 0/1 with a positive sign.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Rational {
    sign: Sign,
    numerator: BigInt,
    denominator: BigInt,
}
impl Default for Rational {
    fn default() -> Self {
        Self::zero()
    }
}
impl Rational {
    /// Construct a new rational from a numerator and a denominator. The
    /// result is reduced immediately.
    ///
    /// ## Panics
    /// Panics if the denominator is 0
    pub fn new<N: Into<BigInt>, D: Into<BigInt>>(numerator: N, denominator: D) -> Self {
        let numerator = numerator.into();
        let denominator = denominator.into();
        assert!(!denominator.is_zero(), "denominator is 0");
        Self::from_parts(numerator, denominator)
    }

    fn from_parts(mut numerator: BigInt, mut denominator: BigInt) -> Self {
        let sign = numerator.sign() * denominator.sign();
        numerator.set_sign(Sign::Positive);
        denominator.set_sign(Sign::Positive);
        let mut result = Self {
            sign,
            numerator,
            denominator,
        };
        result.normalize();
        result
    }

    /// Return the sign
    pub fn sign(&self) -> Sign {
        self.sign
    }
    /// Borrow the reduced numerator magnitude
    pub fn numerator(&self) -> &BigInt {
        &self.numerator
    }
    /// Borrow the reduced denominator, always positive
    pub fn denominator(&self) -> &BigInt {
        &self.denominator
    }

    /// Return this value with a positive sign, no matter if it's
    /// negative or already positive.
    pub fn abs(&self) -> Self {
        let mut copy = self.clone();
        copy.sign = Sign::Positive;
        copy
    }

    /// The reciprocal, same as in mathematics taking the power of -1.
    ///
    /// ## Panics
    /// Panics if the value is 0
    pub fn inverse(mut self) -> Self {
        assert!(!self.numerator.is_zero(), "new denominator is 0");
        mem::swap(&mut self.numerator, &mut self.denominator);
        self
    }

    /// Calculates division, but returns None if other is 0
    pub fn checked_div(mut self, other: &Self) -> Option<Self> {
        if other.numerator.is_zero() {
            return None;
        }
        self.numerator *= &other.denominator;
        self.denominator *= &other.numerator;
        self.sign = self.sign * other.sign;
        self.normalize();
        Some(self)
    }

    /// Render the exact value with `precision` digits after the decimal
    /// point, truncated toward zero. A precision of 0 yields the integer
    /// part alone, with no decimal point.
    pub fn to_decimal(&self, precision: usize) -> String {
        let scaled = self.numerator.clone() * &BigInt::pow10(precision);
        let digits = (scaled / &self.denominator).to_string();
        let integer_len = digits.len().saturating_sub(precision);

        let mut result = String::with_capacity(digits.len() + 2);
        if self.sign == Sign::Negative {
            result.push('-');
        }
        if integer_len == 0 {
            result.push('0');
        } else {
            result.push_str(&digits[..integer_len]);
        }
        if precision > 0 {
            result.push('.');
            for _ in 0..precision - (digits.len() - integer_len) {
                result.push('0');
            }
            result.push_str(&digits[integer_len..]);
        }
        result
    }

    /// Approximate the value as a float through its decimal rendering
    pub fn to_f64(&self) -> f64 {
        self.to_decimal(17)
            .parse()
            .expect("decimal rendering is a valid float literal")
    }

    fn add_signed(&mut self, other: &Self, negate: bool) {
        let other_sign = if negate { -other.sign } else { other.sign };
        self.numerator.set_sign(self.sign);
        self.sign = Sign::Positive;
        self.numerator *= &other.denominator;
        let cross = other.numerator.clone() * &self.denominator;
        if other_sign == Sign::Positive {
            self.numerator += &cross;
        } else {
            self.numerator -= &cross;
        }
        self.denominator *= &other.denominator;
        self.normalize();
    }

    fn normalize(&mut self) {
        self.sign = self.sign * self.numerator.sign();
        self.numerator.set_sign(Sign::Positive);
        if self.numerator.is_zero() {
            self.sign = Sign::Positive;
        }
        let divisor = gcd(self.numerator.clone(), self.denominator.clone());
        if !divisor.is_one() {
            self.numerator /= &divisor;
            self.denominator /= &divisor;
        }
    }
}

impl<T: Into<BigInt>> From<T> for Rational {
    fn from(value: T) -> Self {
        let mut numerator = value.into();
        let sign = numerator.sign();
        numerator.set_sign(Sign::Positive);
        Self {
            sign,
            numerator,
            denominator: BigInt::one(),
        }
    }
}

impl FromStr for Rational {
    type Err = ParseRationalError;
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut parts = input.splitn(2, '/');
        let numerator: BigInt = parts.next().unwrap_or_default().parse()?;
        let denominator = match parts.next() {
            Some(part) => part.parse()?,
            None => BigInt::one(),
        };
        if denominator.is_zero() {
            return Err(ParseRationalError::ZeroDenominator);
        }
        Ok(Self::from_parts(numerator, denominator))
    }
}

impl Zero for Rational {
    fn zero() -> Self {
        BigInt::zero().into()
    }
    fn is_zero(&self) -> bool {
        self.numerator.is_zero()
    }
}
impl One for Rational {
    fn one() -> Self {
        BigInt::one().into()
    }
    fn is_one(&self) -> bool {
        self.sign == Sign::Positive && self.numerator.is_one() && self.denominator.is_one()
    }
}

impl Neg for Rational {
    type Output = Self;
    fn neg(mut self) -> Self::Output {
        if !self.numerator.is_zero() {
            self.sign = -self.sign;
        }
        self
    }
}

impl AddAssign<&Self> for Rational {
    fn add_assign(&mut self, other: &Self) {
        self.add_signed(other, false);
    }
}
impl SubAssign<&Self> for Rational {
    fn sub_assign(&mut self, other: &Self) {
        self.add_signed(other, true);
    }
}
impl MulAssign<&Self> for Rational {
    fn mul_assign(&mut self, other: &Self) {
        self.numerator *= &other.numerator;
        self.denominator *= &other.denominator;
        self.sign = self.sign * other.sign;
        self.normalize();
    }
}
impl DivAssign<&Self> for Rational {
    fn div_assign(&mut self, other: &Self) {
        let mut value = Self::zero();
        mem::swap(self, &mut value);
        *self = value.checked_div(other).expect("division by zero");
    }
}

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.sign, other.sign) {
            (Sign::Negative, Sign::Positive) => Ordering::Less,
            (Sign::Positive, Sign::Negative) => Ordering::Greater,
            (sign, _) => {
                let lhs = self.numerator.clone() * &other.denominator;
                let rhs = other.numerator.clone() * &self.denominator;
                let magnitude = lhs.cmp(&rhs);
                if sign == Sign::Negative {
                    magnitude.reverse()
                } else {
                    magnitude
                }
            }
        }
    }
}
impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.sign == Sign::Negative {
            write!(f, "-")?;
        } else if f.sign_plus() {
            write!(f, "+")?;
        }
        write!(f, "{}", self.numerator)?;
        if !self.denominator.is_one() {
            write!(f, "/{}", self.denominator)?;
        }
        Ok(())
    }
}
impl fmt::Debug for Rational {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

macro_rules! impl_op {
    ($($op_trait:ident $op_fn:ident = $assign_trait:ident $assign_fn:ident),*) => {
        $(
            impl $op_trait<&Self> for Rational {
                type Output = Self;
                fn $op_fn(mut self, other: &Self) -> Self::Output {
                    self.$assign_fn(other);
                    self
                }
            }
            impl<T: Into<Self>> $op_trait<T> for Rational {
                type Output = Self;
                fn $op_fn(mut self, other: T) -> Self::Output {
                    self.$assign_fn(&other.into());
                    self
                }
            }
            impl<T: Into<Self>> $assign_trait<T> for Rational {
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
    Div div = DivAssign div_assign
}
