//! Reed-Solomon encoding and syndrome-based correction over a
//! [`GaloisField`].
//!
//! One engine serves every binary-extension symbology; only the field
//! parameters differ. Correction is strictly validated: it fails rather
//! than silently returning partially corrected data.

use super::galois::GaloisField;

/// Reed-Solomon codec bound to a field.
pub struct ReedSolomon<'f> {
    field: &'f GaloisField,
}

impl<'f> ReedSolomon<'f> {
    /// Create a codec over the given field.
    pub fn new(field: &'f GaloisField) -> Self {
        Self { field }
    }

    /// Append `ec_len` parity codewords to `data`.
    pub fn encode(&self, data: &[u16], ec_len: usize) -> Vec<u16> {
        let field = self.field;
        let divisor = field.compute_divisor(ec_len);
        let mut remainder = vec![0u16; ec_len];

        for &d in data {
            let factor = d ^ remainder[0];
            remainder.rotate_left(1);
            remainder[ec_len - 1] = 0;
            for (r, &g) in remainder.iter_mut().zip(divisor.iter()) {
                *r ^= field.mul(g, factor);
            }
        }

        let mut codeword = data.to_vec();
        codeword.extend_from_slice(&remainder);
        codeword
    }

    /// Correct up to `ec_len / 2` codeword errors in place. Returns the
    /// number of corrected codewords, or `None` when the stream is
    /// uncorrectable; `codewords` may then hold garbage and must be
    /// discarded by the caller.
    pub fn correct_in_place(&self, codewords: &mut [u16], ec_len: usize) -> Option<usize> {
        if ec_len == 0 || ec_len >= codewords.len() {
            return None;
        }
        let field = self.field;
        for &cw in codewords.iter() {
            if cw as usize >= field.size() {
                return None;
            }
        }

        let syndromes = self.syndromes(codewords, ec_len);
        if syndromes.iter().all(|&s| s == 0) {
            return Some(0);
        }

        let Some((sigma, degree)) = self.find_error_locator(&syndromes) else {
            return None;
        };
        if degree == 0 || degree > ec_len / 2 {
            return None;
        }

        // Chien search for roots of sigma; error locations are the inverses.
        let mut locations = Vec::with_capacity(degree);
        for i in 1..field.size() {
            if locations.len() == degree {
                break;
            }
            if self.eval_poly(&sigma[..=degree], i as u16) == 0 {
                locations.push(field.inverse(i as u16));
            }
        }
        if locations.len() != degree {
            return None;
        }

        // Omega = (S * sigma) mod x^ec_len
        let mut omega = vec![0u16; ec_len];
        for (i, &s) in sigma.iter().enumerate().take(degree + 1) {
            if s == 0 {
                continue;
            }
            for (j, &syn) in syndromes.iter().enumerate() {
                if i + j >= ec_len {
                    break;
                }
                omega[i + j] ^= field.mul(s, syn);
            }
        }

        // Formal derivative of sigma: odd terms shifted down one degree.
        let mut sigma_deriv = vec![0u16; degree];
        for i in (1..=degree).step_by(2) {
            sigma_deriv[i - 1] = sigma[i];
        }

        // Forney: e_k = X_k^(1-base) * omega(X_k^-1) / sigma'(X_k^-1)
        let n = codewords.len();
        for &x_k in &locations {
            let xi_inv = field.inverse(x_k);
            let numerator = self.eval_poly(&omega, xi_inv);
            let denominator = self.eval_poly(&sigma_deriv, xi_inv);
            if denominator == 0 {
                return None;
            }
            let mut magnitude = field.mul(numerator, field.inverse(denominator));
            if field.generator_base() == 0 {
                magnitude = field.mul(magnitude, x_k);
            }

            let position_log = field.log_of(x_k);
            if position_log >= n {
                return None;
            }
            codewords[n - 1 - position_log] ^= magnitude;
        }

        // A corrected stream must have an all-zero syndrome.
        if self.syndromes(codewords, ec_len).iter().any(|&s| s != 0) {
            return None;
        }
        Some(degree)
    }

    fn syndromes(&self, codewords: &[u16], ec_len: usize) -> Vec<u16> {
        let field = self.field;
        let base = field.generator_base() as usize;
        let mut syndromes = vec![0u16; ec_len];
        for (i, syndrome) in syndromes.iter_mut().enumerate() {
            let x = field.exp_of(i + base);
            let mut eval = 0u16;
            for &cw in codewords {
                eval = field.mul(eval, x) ^ cw;
            }
            *syndrome = eval;
        }
        syndromes
    }

    /// Berlekamp-Massey. Returns the locator polynomial (coefficient order
    /// sigma[0] = 1) and its degree.
    fn find_error_locator(&self, syndromes: &[u16]) -> Option<(Vec<u16>, usize)> {
        let field = self.field;
        let ec_len = syndromes.len();
        let mut sigma = vec![0u16; ec_len + 1];
        let mut prev = vec![0u16; ec_len + 1];
        let mut temp = vec![0u16; ec_len + 1];
        sigma[0] = 1;
        prev[0] = 1;

        let mut degree = 0usize;
        let mut m = 1usize;
        let mut b = 1u16;

        for n in 0..ec_len {
            let mut d = syndromes[n];
            for i in 1..=degree {
                d ^= field.mul(sigma[i], syndromes[n - i]);
            }

            if d == 0 {
                m += 1;
                continue;
            }

            temp.copy_from_slice(&sigma);
            let coef = field.mul(d, field.inverse(b));
            for i in 0..prev.len() {
                if prev[i] == 0 {
                    continue;
                }
                let idx = i + m;
                if idx >= sigma.len() {
                    break;
                }
                sigma[idx] ^= field.mul(coef, prev[i]);
            }

            if 2 * degree <= n {
                degree = n + 1 - degree;
                prev.copy_from_slice(&temp);
                b = d;
                m = 1;
            } else {
                m += 1;
            }
        }

        if degree > ec_len {
            return None;
        }
        Some((sigma, degree))
    }

    fn eval_poly(&self, poly: &[u16], x: u16) -> u16 {
        let field = self.field;
        let mut y = 0u16;
        for &coeff in poly.iter().rev() {
            y = field.mul(y, x) ^ coeff;
        }
        y
    }
}
