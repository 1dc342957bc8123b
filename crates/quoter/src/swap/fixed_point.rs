//! Module emulating the 18-decimal fixed point arithmetic used by the
//! weighted pool contracts, including their round-half-up semantics on
//! multiplication and division and their binomial-series fractional power.
//!
//! The iteration and rounding sequence is kept identical to the on-chain
//! code on purpose: a quote previewed with this module must match the
//! executed on-chain result bit-for-bit, so no operation here may be
//! replaced by a higher-precision equivalent.

use {
    super::error::Error,
    anyhow::{Context, Result, ensure},
    primitive_types::U256,
    std::{fmt, str::FromStr},
};

/// 1.0 in the fixed point scale.
const ONE_18: U256 = U256([1_000_000_000_000_000_000, 0, 0, 0]);
/// Added before truncating by `ONE_18` to round half up.
const ONE_18_HALF: U256 = U256([500_000_000_000_000_000, 0, 0, 0]);
/// Minimum term magnitude at which the fractional power series terminates.
/// Deliberately coarse (`ONE_18 / 10^10`): the on-chain contract stops there
/// to bound gas, and the preview must stop at the exact same term.
const POW_PRECISION: U256 = U256([100_000_000, 0, 0, 0]);
/// Convergence domain of the power series: base must be in
/// `[MIN_POW_BASE, MAX_POW_BASE]`, i.e. `(0, 2)` in real terms.
const MIN_POW_BASE: U256 = U256([1, 0, 0, 0]);
const MAX_POW_BASE: U256 = U256([1_999_999_999_999_999_999, 0, 0, 0]);

/// Fixed point number with 18 decimals of precision.
#[derive(Clone, Copy, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Bfp(U256);

impl Bfp {
    pub fn zero() -> Self {
        Self(U256::zero())
    }

    pub fn one() -> Self {
        Self(ONE_18)
    }

    /// Reinterprets a raw wei quantity as a fixed point number.
    pub fn from_wei(amount: U256) -> Self {
        Self(amount)
    }

    pub fn as_uint256(self) -> U256 {
        self.0
    }

    /// 10^exp as a fixed point number.
    pub fn exp10(exp: usize) -> Self {
        Self(U256::exp10(exp + 18))
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    pub fn add(self, other: Self) -> Result<Self, Error> {
        self.0
            .checked_add(other.0)
            .map(Self)
            .ok_or(Error::AddOverflow)
    }

    pub fn sub(self, other: Self) -> Result<Self, Error> {
        self.0
            .checked_sub(other.0)
            .map(Self)
            .ok_or(Error::SubOverflow)
    }

    /// `1 - self`, saturating at zero.
    pub fn complement(self) -> Self {
        if self.0 >= ONE_18 {
            Self::zero()
        } else {
            Self(ONE_18 - self.0)
        }
    }

    /// Multiplication rounding half up at the scale boundary:
    /// `(a * b + ONE/2) / ONE`.
    pub fn mul(self, other: Self) -> Result<Self, Error> {
        let product = self.0.checked_mul(other.0).ok_or(Error::MulOverflow)?;
        let rounded = product.checked_add(ONE_18_HALF).ok_or(Error::MulOverflow)?;
        Ok(Self(rounded / ONE_18))
    }

    /// Division rounding half up: `(a * ONE + b/2) / b`.
    pub fn div(self, other: Self) -> Result<Self, Error> {
        if other.0.is_zero() {
            return Err(Error::ZeroDivision);
        }
        let inflated = self.0.checked_mul(ONE_18).ok_or(Error::DivInternal)?;
        let rounded = inflated
            .checked_add(other.0 / 2)
            .ok_or(Error::DivInternal)?;
        Ok(Self(rounded / other.0))
    }

    /// The whole-unit part, truncated toward zero.
    pub fn integer_part(self) -> U256 {
        self.0 / ONE_18
    }

    /// Value rounded down to the nearest whole unit.
    pub fn floor(self) -> Self {
        Self(self.integer_part() * ONE_18)
    }

    /// `self^exp` for a fractional fixed point exponent. The exponent is
    /// split into its whole part, handled by exponentiation by squaring, and
    /// its remainder, handled by [`Bfp::pow_approx`].
    pub fn pow(self, exp: Self) -> Result<Self, Error> {
        if self.0 < MIN_POW_BASE {
            return Err(Error::PowBaseTooLow);
        }
        if self.0 > MAX_POW_BASE {
            return Err(Error::PowBaseTooHigh);
        }

        let whole = exp.floor();
        let remain = exp.sub(whole)?;
        let whole_pow = self.powi(whole.integer_part())?;
        if remain.is_zero() {
            return Ok(whole_pow);
        }
        whole_pow.mul(self.pow_approx(remain, POW_PRECISION)?)
    }

    /// Exponentiation by squaring for whole exponents, every step through
    /// the rounding multiplication above.
    fn powi(self, mut n: U256) -> Result<Self, Error> {
        let mut a = self;
        let mut z = if (n % 2).is_zero() { Self::one() } else { a };

        n = n / 2;
        while !n.is_zero() {
            a = a.mul(a)?;
            if !(n % 2).is_zero() {
                z = z.mul(a)?;
            }
            n = n / 2;
        }
        Ok(z)
    }

    /// Binomial series approximation of `self^exp` for `0 < exp < 1`,
    /// expanding `(1 + x)^exp` around `x = self - 1` with the sign of each
    /// term tracked explicitly. Terminates once a term's magnitude drops
    /// below `precision` or reaches exactly zero.
    pub fn pow_approx(self, exp: Self, precision: U256) -> Result<Self, Error> {
        let a = exp.0;
        let (x, x_negative) = sub_sign(self.0, ONE_18);
        let mut term = Self::one();
        let mut sum = term.0;
        let mut negative = false;

        // term(k) = term(k-1) * (a - (k-1)) * x / k, with k and (k-1) in the
        // fixed point scale.
        let mut k = 1u64;
        while term.0 >= precision {
            let big_k = U256::from(k) * ONE_18;
            let (c, c_negative) = sub_sign(a, big_k - ONE_18);
            term = term.mul(Self(c).mul(Self(x))?)?;
            term = term.div(Self(big_k))?;
            if term.is_zero() {
                break;
            }

            if x_negative {
                negative = !negative;
            }
            if c_negative {
                negative = !negative;
            }
            if negative {
                sum = sum.checked_sub(term.0).ok_or(Error::SubOverflow)?;
            } else {
                sum = sum.checked_add(term.0).ok_or(Error::AddOverflow)?;
            }
            k += 1;
        }

        Ok(Self(sum))
    }
}

/// `|a - b|` along with whether the difference is negative.
fn sub_sign(a: U256, b: U256) -> (U256, bool) {
    if a >= b { (a - b, false) } else { (b - a, true) }
}

impl From<usize> for Bfp {
    fn from(amount: usize) -> Self {
        Self(U256::from(amount) * ONE_18)
    }
}

impl FromStr for Bfp {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (integer_part, decimal_part) = s.split_once('.').unwrap_or((s, "0"));
        ensure!(
            !decimal_part.is_empty() && decimal_part.len() <= 18,
            "at most 18 decimal digits are representable"
        );
        let units = U256::from_dec_str(integer_part).context("invalid integer part")?;
        let decimals = U256::from_dec_str(decimal_part).context("invalid decimal part")?;
        let value = units
            .checked_mul(ONE_18)
            .and_then(|units| {
                units.checked_add(decimals * U256::exp10(18 - decimal_part.len()))
            })
            .context("value too large to represent")?;
        Ok(Self(value))
    }
}

impl fmt::Display for Bfp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let integer_part = self.integer_part();
        let decimal_part = self.0 % ONE_18;
        if decimal_part.is_zero() {
            write!(f, "{integer_part}")
        } else {
            // the remainder is below 10^18 so it fits a u128
            let decimals = format!("{:0>18}", decimal_part.as_u128());
            write!(f, "{integer_part}.{}", decimals.trim_end_matches('0'))
        }
    }
}

impl fmt::Debug for Bfp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Bfp({self})")
    }
}

/// Constructs a [`Bfp`] from a decimal string literal.
#[macro_export]
macro_rules! bfp {
    ($amount:expr) => {
        $amount
            .parse::<$crate::swap::fixed_point::Bfp>()
            .expect("valid fixed point literal")
    };
}

#[cfg(test)]
mod tests {
    use {super::*, num::BigInt};

    #[test]
    fn parses_decimal_literals() {
        assert_eq!(bfp!("1"), Bfp::one());
        assert_eq!(bfp!("0.5").as_uint256(), ONE_18_HALF);
        assert_eq!(
            bfp!("0.003").as_uint256(),
            U256::from(3_000_000_000_000_000u64)
        );
        assert_eq!(bfp!("1010"), Bfp::from(1010));
        assert!("0.0000000000000000001".parse::<Bfp>().is_err());
        assert!("1.".parse::<Bfp>().is_err());
        assert!("nope".parse::<Bfp>().is_err());
    }

    #[test]
    fn exp10_scales_into_the_fixed_point_representation() {
        assert_eq!(Bfp::exp10(0), Bfp::one());
        assert_eq!(Bfp::exp10(2), Bfp::from(100));
        assert_eq!(Bfp::exp10(2).as_uint256(), U256::exp10(20));
    }

    #[test]
    fn displays_trimmed_decimals() {
        assert_eq!(bfp!("1.25").to_string(), "1.25");
        assert_eq!(bfp!("2").to_string(), "2");
        assert_eq!(
            Bfp::from_wei(U256::from(1)).to_string(),
            "0.000000000000000001"
        );
    }

    #[test]
    fn multiplication_rounds_half_up() {
        // 3 * 2 in scale
        assert_eq!(bfp!("3").mul(bfp!("2")).unwrap(), bfp!("6"));
        // 1 wei * 1 wei: product 1e-36 rounds up to 1 wei at the half point?
        // 1 * 1 + 5e17 = 5e17 + 1, / 1e18 = 0
        assert_eq!(
            Bfp::from_wei(1.into()).mul(Bfp::from_wei(1.into())).unwrap(),
            Bfp::zero()
        );
        // exactly half a wei of product rounds up
        assert_eq!(
            Bfp::from_wei(ONE_18_HALF)
                .mul(Bfp::from_wei(1.into()))
                .unwrap(),
            Bfp::from_wei(1.into())
        );
    }

    #[test]
    fn division_rounds_half_up() {
        assert_eq!(
            bfp!("1").div(bfp!("3")).unwrap().as_uint256(),
            U256::from_dec_str("333333333333333333").unwrap()
        );
        assert_eq!(
            bfp!("2").div(bfp!("3")).unwrap().as_uint256(),
            U256::from_dec_str("666666666666666667").unwrap()
        );
        assert_eq!(bfp!("1").div(Bfp::zero()), Err(Error::ZeroDivision));
    }

    #[test]
    fn rounding_matches_big_integer_reference() {
        let one = BigInt::from(10).pow(18);
        let cases = [
            ("1.000000000000000001", "2.999999999999999999"),
            ("0.000000000000000123", "7.5"),
            ("123456.789123456789123456", "0.987654321987654321"),
            ("1.5", "1.5"),
        ];
        for (a, b) in cases {
            let (a, b) = (bfp!(a), bfp!(b));
            let big = |value: Bfp| BigInt::parse_bytes(value.as_uint256().to_string().as_bytes(), 10).unwrap();

            let reference_mul = (big(a) * big(b) + &one / 2) / &one;
            assert_eq!(big(a.mul(b).unwrap()), reference_mul);

            let reference_div = (big(a) * &one + big(b) / 2) / big(b);
            assert_eq!(big(a.div(b).unwrap()), reference_div);
        }
    }

    #[test]
    fn integer_part_and_floor_truncate() {
        assert_eq!(bfp!("4.9").integer_part(), U256::from(4));
        assert_eq!(bfp!("4.9").floor(), bfp!("4"));
        assert_eq!(bfp!("0.9").floor(), Bfp::zero());
    }

    #[test]
    fn whole_exponents_use_squaring() {
        assert_eq!(bfp!("1.5").powi(U256::zero()).unwrap(), Bfp::one());
        assert_eq!(
            bfp!("1.5").powi(U256::from(3)).unwrap(),
            bfp!("3.375")
        );
    }

    #[test]
    fn pow_reproduces_reference_values() {
        // reference values from the fixed point algorithm itself; these pin
        // the exact rounding sequence, not a mathematical ideal
        assert_eq!(
            bfp!("1.21").pow(bfp!("0.5")).unwrap().as_uint256(),
            U256::from_dec_str("1099999999991934267").unwrap()
        );
        assert_eq!(
            bfp!("1.5").pow(bfp!("2.5")).unwrap().as_uint256(),
            U256::from_dec_str("2755675960680257291").unwrap()
        );
    }

    #[test]
    fn pow_rejects_out_of_domain_bases() {
        assert_eq!(
            Bfp::zero().pow(bfp!("0.5")),
            Err(Error::PowBaseTooLow)
        );
        assert_eq!(bfp!("2").pow(bfp!("0.5")), Err(Error::PowBaseTooHigh));
        // bases strictly inside (0, 2) are fine
        assert!(bfp!("1.9").pow(bfp!("0.5")).is_ok());
        assert!(bfp!("0.1").pow(bfp!("0.5")).is_ok());
    }

    #[test]
    fn pow_approx_terminates_on_zero_term() {
        // base exactly one: x = 0, the first term is zero and the sum is one
        assert_eq!(
            Bfp::one().pow_approx(bfp!("0.5"), POW_PRECISION).unwrap(),
            Bfp::one()
        );
    }

    #[test]
    fn complement_saturates() {
        assert_eq!(bfp!("0.4").complement(), bfp!("0.6"));
        assert_eq!(bfp!("1.4").complement(), Bfp::zero());
    }
}
