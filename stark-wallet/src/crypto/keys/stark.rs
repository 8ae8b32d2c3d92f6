//! STARK curve key pairs
//!
//! Field and point arithmetic come from `starknet-types-core`; the domain
//! parameters are the `starknet-curve` constants. Public keys are encoded
//! SEC1-style: `04 ‖ x ‖ y` uncompressed, `02|03 ‖ x` compressed, with 32-byte
//! coordinates.

use std::fmt;

use num_bigint::BigUint;
use num_traits::{One, Zero};
use starknet_curve::curve_params::{ALPHA, BETA, EC_ORDER, GENERATOR};
use starknet_types_core::curve::{AffinePoint, ProjectivePoint};
use starknet_types_core::felt::Felt;

use crate::crypto::encoding::{add_hex_prefix, biguint_to_even_hex, decode_hex, hex_to_biguint};
use crate::error::{Error, Result};

/// Byte length of one encoded coordinate
const COORDINATE_BYTES: usize = 32;

/// Domain parameters of the STARK curve `y² = x³ + αx + β`
#[derive(Debug, Clone)]
pub struct StarkCurve {
    /// The α coefficient
    pub alpha: Felt,
    /// The β coefficient
    pub beta: Felt,
    /// Order of the generator
    pub order: Felt,
    /// The generator point
    pub generator: AffinePoint,
}

/// The STARK curve, shared read-only by every derivation
pub const STARK_CURVE: StarkCurve = StarkCurve {
    alpha: ALPHA,
    beta: BETA,
    order: EC_ORDER,
    generator: GENERATOR,
};

impl StarkCurve {
    /// The field prime `2^251 + 17·2^192 + 1`
    pub fn prime(&self) -> BigUint {
        (BigUint::one() << 251u32) + (BigUint::from(17u32) << 192u32) + BigUint::one()
    }

    /// The generator order as an integer
    pub fn order_biguint(&self) -> BigUint {
        felt_to_biguint(&self.order)
    }

    /// Build a key pair from a private key in hex
    ///
    /// The scalar is reduced modulo the curve order; a scalar that reduces to
    /// zero has no public key and is rejected.
    pub fn key_from_private(&self, private_key_hex: &str) -> Result<StarkKeyPair> {
        let scalar = hex_to_biguint(private_key_hex)
            .map_err(|e| Error::InvalidPrivateKey(e.to_string()))?
            % self.order_biguint();
        if scalar.is_zero() {
            return Err(Error::InvalidPrivateKey("Private key is zero modulo the curve order".to_string()));
        }

        let private_key = biguint_to_felt(&scalar)?;
        let public_key = self.multiply_generator(private_key)?;

        Ok(StarkKeyPair { private_key, public_key })
    }

    /// Decode a compressed or uncompressed public key
    pub fn key_from_public(&self, encoded: &[u8]) -> Result<StarkPublicKey> {
        let point = match encoded {
            [prefix @ (0x02 | 0x03), x @ ..] if x.len() == COORDINATE_BYTES => {
                self.decompress(self.coordinate(x)?, *prefix == 0x03)?
            }
            [0x04, xy @ ..] if xy.len() == 2 * COORDINATE_BYTES => {
                let x = self.coordinate(&xy[..COORDINATE_BYTES])?;
                let y = self.coordinate(&xy[COORDINATE_BYTES..])?;
                if y * y != self.curve_rhs(x) {
                    return Err(Error::InvalidPublicKey("Point is not on the curve".to_string()));
                }
                AffinePoint::new(x, y)
                    .map_err(|e| Error::InvalidPublicKey(format!("Point is not on the curve: {:?}", e)))?
            }
            _ => {
                return Err(Error::InvalidPublicKey(format!(
                    "Unsupported public key encoding of {} bytes",
                    encoded.len()
                )))
            }
        };

        Ok(StarkPublicKey { point })
    }

    fn multiply_generator(&self, scalar: Felt) -> Result<AffinePoint> {
        let generator = ProjectivePoint::from_affine(self.generator.x(), self.generator.y())
            .map_err(|e| Error::InvalidPublicKey(format!("Invalid generator: {:?}", e)))?;

        (&generator * scalar)
            .to_affine()
            .map_err(|e| Error::InvalidPrivateKey(format!("Public key is the point at infinity: {:?}", e)))
    }

    /// Parse a 32-byte coordinate, rejecting values outside the field
    fn coordinate(&self, bytes: &[u8]) -> Result<Felt> {
        let value = BigUint::from_bytes_be(bytes);
        if value >= self.prime() {
            return Err(Error::InvalidPublicKey("Coordinate exceeds the field prime".to_string()));
        }
        biguint_to_felt(&value)
    }

    /// `x³ + αx + β`
    fn curve_rhs(&self, x: Felt) -> Felt {
        x * x * x + self.alpha * x + self.beta
    }

    fn decompress(&self, x: Felt, y_odd: bool) -> Result<AffinePoint> {
        let y = self
            .curve_rhs(x)
            .sqrt()
            .ok_or_else(|| Error::InvalidPublicKey("No curve point with this x-coordinate".to_string()))?;
        let y = if is_odd(&y) == y_odd { y } else { -y };

        AffinePoint::new(x, y)
            .map_err(|e| Error::InvalidPublicKey(format!("Point is not on the curve: {:?}", e)))
    }
}

/// A curve key pair the public-key helpers can encode
pub trait CurveKeyPair {
    /// The private scalar as hex, without prefix
    fn private_key_hex(&self) -> String;

    /// The public point's encoding as hex, without prefix
    fn public_key_encoding(&self, compressed: bool) -> String;
}

/// A STARK key pair
///
/// Holds the private scalar for as long as the value lives. Nothing wipes it
/// on drop; callers decide when to discard it.
#[derive(Clone, PartialEq)]
pub struct StarkKeyPair {
    private_key: Felt,
    public_key: AffinePoint,
}

impl StarkKeyPair {
    /// The private scalar, in `[1, order)`
    pub fn private_key(&self) -> Felt {
        self.private_key
    }

    /// The public point
    pub fn public_key(&self) -> &AffinePoint {
        &self.public_key
    }
}

impl CurveKeyPair for StarkKeyPair {
    fn private_key_hex(&self) -> String {
        felt_to_biguint(&self.private_key).to_str_radix(16)
    }

    fn public_key_encoding(&self, compressed: bool) -> String {
        hex::encode(encode_point(&self.public_key, compressed))
    }
}

impl fmt::Debug for StarkKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StarkKeyPair")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

/// A decoded STARK public key
#[derive(Debug, Clone, PartialEq)]
pub struct StarkPublicKey {
    point: AffinePoint,
}

impl StarkPublicKey {
    /// The x-coordinate
    pub fn x(&self) -> Felt {
        self.point.x()
    }

    /// The y-coordinate
    pub fn y(&self) -> Felt {
        self.point.y()
    }

    /// The underlying point
    pub fn point(&self) -> &AffinePoint {
        &self.point
    }
}

/// Encode a key pair's public point as hex
pub fn public_key_encoding<K: CurveKeyPair>(key_pair: &K, compressed: bool) -> String {
    key_pair.public_key_encoding(compressed)
}

/// Extract the x-coordinate of an encoded public key
///
/// Returns lowercase hex without prefix, padded to a whole number of bytes.
pub fn x_coordinate_of(public_key_hex: &str) -> Result<String> {
    let encoded = decode_hex(public_key_hex)
        .map_err(|e| Error::InvalidPublicKey(e.to_string()))?;
    let public_key = STARK_CURVE.key_from_public(&encoded)?;
    Ok(biguint_to_even_hex(&felt_to_biguint(&public_key.x())))
}

/// The STARK public key: `0x` followed by the public point's x-coordinate
pub fn stark_public_key_of<K: CurveKeyPair>(key_pair: &K) -> Result<String> {
    let x = x_coordinate_of(&public_key_encoding(key_pair, true))?;
    Ok(add_hex_prefix(&x))
}

fn encode_point(point: &AffinePoint, compressed: bool) -> Vec<u8> {
    let x = point.x().to_bytes_be();
    let y = point.y().to_bytes_be();

    if compressed {
        let mut encoded = Vec::with_capacity(1 + COORDINATE_BYTES);
        encoded.push(if is_odd(&point.y()) { 0x03 } else { 0x02 });
        encoded.extend_from_slice(&x);
        encoded
    } else {
        let mut encoded = Vec::with_capacity(1 + 2 * COORDINATE_BYTES);
        encoded.push(0x04);
        encoded.extend_from_slice(&x);
        encoded.extend_from_slice(&y);
        encoded
    }
}

fn is_odd(value: &Felt) -> bool {
    value.to_bytes_be()[COORDINATE_BYTES - 1] & 1 == 1
}

fn felt_to_biguint(value: &Felt) -> BigUint {
    BigUint::from_bytes_be(&value.to_bytes_be())
}

fn biguint_to_felt(value: &BigUint) -> Result<Felt> {
    let bytes = value.to_bytes_be();
    if bytes.len() > COORDINATE_BYTES {
        return Err(Error::InvalidInput("Value does not fit in a field element".to_string()));
    }
    let mut buffer = [0u8; COORDINATE_BYTES];
    buffer[COORDINATE_BYTES - bytes.len()..].copy_from_slice(&bytes);
    Ok(Felt::from_bytes_be(&buffer))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRIVATE_KEY: &str = "72111720ab45a5a51565dd5694c576afeb5a9b41de127da299811d2a7c3e0af";
    const PUBLIC_X: &str = "05c3f46627ebfb9bab63db3b5ccb6bceaa46de3b8c6858fc686748b1c50a3c9b";

    #[test]
    fn test_curve_parameters() {
        assert_eq!(
            STARK_CURVE.prime().to_str_radix(16),
            "800000000000011000000000000000000000000000000000000000000000001"
        );
        assert_eq!(
            STARK_CURVE.order_biguint().to_str_radix(16),
            "800000000000010ffffffffffffffffb781126dcae7b2321e66a241adc64d2f"
        );
        assert_eq!(STARK_CURVE.alpha, Felt::ONE);
    }

    #[test]
    fn test_unit_scalar_gives_generator() {
        let key_pair = STARK_CURVE.key_from_private("1").unwrap();
        assert_eq!(key_pair.public_key(), &GENERATOR);
    }

    #[test]
    fn test_known_public_key() {
        let key_pair = STARK_CURVE.key_from_private(PRIVATE_KEY).unwrap();
        assert_eq!(key_pair.private_key_hex(), PRIVATE_KEY);

        let compressed = key_pair.public_key_encoding(true);
        assert_eq!(compressed, format!("03{}", PUBLIC_X));

        assert_eq!(stark_public_key_of(&key_pair).unwrap(), format!("0x{}", PUBLIC_X));
    }

    #[test]
    fn test_compressed_and_uncompressed_agree() {
        let key_pair = STARK_CURVE.key_from_private(PRIVATE_KEY).unwrap();
        let compressed = public_key_encoding(&key_pair, true);
        let uncompressed = public_key_encoding(&key_pair, false);

        assert_eq!(uncompressed.len(), 2 * (1 + 64));
        assert!(uncompressed.starts_with("04"));
        assert_eq!(x_coordinate_of(&compressed).unwrap(), x_coordinate_of(&uncompressed).unwrap());

        let from_compressed = STARK_CURVE.key_from_public(&hex::decode(&compressed).unwrap()).unwrap();
        let from_uncompressed = STARK_CURVE.key_from_public(&hex::decode(&uncompressed).unwrap()).unwrap();
        assert_eq!(from_compressed, from_uncompressed);
        assert_eq!(from_compressed.point(), key_pair.public_key());
    }

    #[test]
    fn test_x_coordinate_is_byte_aligned() {
        // The generator's x-coordinate has 63 significant hex digits
        let key_pair = STARK_CURVE.key_from_private("1").unwrap();
        let x = x_coordinate_of(&public_key_encoding(&key_pair, true)).unwrap();
        assert_eq!(x, "01ef15c18599971b7beced415a40f0c7deacfd9b0d1819e03d723d8bc943cfca");
    }

    #[test]
    fn test_private_key_reduced_by_order() {
        let order = STARK_CURVE.order_biguint();
        let shifted = (&order + BigUint::one()).to_str_radix(16);
        let key_pair = STARK_CURVE.key_from_private(&shifted).unwrap();
        assert_eq!(key_pair.private_key_hex(), "1");

        assert!(matches!(
            STARK_CURVE.key_from_private(&order.to_str_radix(16)),
            Err(Error::InvalidPrivateKey(_))
        ));
        assert!(matches!(STARK_CURVE.key_from_private("0"), Err(Error::InvalidPrivateKey(_))));
    }

    #[test]
    fn test_invalid_public_keys() {
        assert!(matches!(STARK_CURVE.key_from_public(&[0x02; 10]), Err(Error::InvalidPublicKey(_))));

        let mut off_curve = vec![0x04];
        off_curve.extend_from_slice(&[0x01; 64]);
        assert!(matches!(STARK_CURVE.key_from_public(&off_curve), Err(Error::InvalidPublicKey(_))));

        let mut too_large = vec![0x02];
        too_large.extend_from_slice(&[0xff; 32]);
        assert!(matches!(STARK_CURVE.key_from_public(&too_large), Err(Error::InvalidPublicKey(_))));
    }

    #[test]
    fn test_debug_hides_private_key() {
        let key_pair = STARK_CURVE.key_from_private(PRIVATE_KEY).unwrap();
        assert!(!format!("{:?}", key_pair).contains("72111720"));
    }
}
