//! Sums the series e = 1/0! + 1/1! + 1/2! + ... exactly and prints the
//! first 30 decimal places.

use exact_types::{BigInt, Rational};
use num_traits::One;

fn main() {
    let mut e = Rational::from(1);
    let mut factorial = BigInt::one();
    for k in 1..=40 {
        factorial *= k;
        e += Rational::new(BigInt::one(), factorial.clone());
    }
    println!("e = {}", e.to_decimal(30));
    println!("  = {}", e);
}
