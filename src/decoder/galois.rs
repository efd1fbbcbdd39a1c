//! Binary-extension Galois fields parameterized per symbology.
//!
//! Each symbology family brings its own field size, primitive polynomial and
//! generator base. Instances are built once and shared read-only across
//! concurrent decode attempts.

use std::sync::OnceLock;

/// A GF(2^m) field with precomputed log/antilog tables.
pub struct GaloisField {
    size: usize,
    primitive: u32,
    generator_base: u32,
    exp: Vec<u16>,
    log: Vec<u16>,
}

impl GaloisField {
    /// Build a field of `size` elements (a power of two) over the given
    /// primitive polynomial. `generator_base` is the exponent of the first
    /// generator-polynomial root (0 for QR, 1 for Data Matrix and Aztec).
    pub fn new(size: usize, primitive: u32, generator_base: u32) -> Self {
        debug_assert!(size.is_power_of_two() && size >= 4);
        let order = size - 1;
        // Double-length antilog table avoids a modulo in multiply.
        let mut exp = vec![0u16; 2 * order];
        let mut log = vec![0u16; size];
        let mut x = 1usize;
        for i in 0..order {
            exp[i] = x as u16;
            log[x] = i as u16;
            x <<= 1;
            if x >= size {
                x ^= primitive as usize;
            }
        }
        for i in order..exp.len() {
            exp[i] = exp[i - order];
        }
        log[0] = 0; // Sentinel; log(0) is undefined.
        Self {
            size,
            primitive,
            generator_base,
            exp,
            log,
        }
    }

    /// Number of field elements.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Primitive polynomial this field was built over.
    pub fn primitive(&self) -> u32 {
        self.primitive
    }

    /// Exponent of the first generator root.
    pub fn generator_base(&self) -> u32 {
        self.generator_base
    }

    /// alpha^exponent
    pub fn exp_of(&self, exponent: usize) -> u16 {
        self.exp[exponent % (self.size - 1)]
    }

    /// Discrete log of a non-zero element.
    pub fn log_of(&self, value: u16) -> usize {
        debug_assert!(value != 0);
        self.log[value as usize] as usize
    }

    /// Field multiplication.
    pub fn mul(&self, a: u16, b: u16) -> u16 {
        if a == 0 || b == 0 {
            return 0;
        }
        self.exp[self.log[a as usize] as usize + self.log[b as usize] as usize]
    }

    /// Multiplicative inverse of a non-zero element.
    pub fn inverse(&self, a: u16) -> u16 {
        debug_assert!(a != 0);
        self.exp[self.size - 1 - self.log[a as usize] as usize]
    }

    /// Generator polynomial coefficients of the given degree, excluding the
    /// leading 1, ordered from x^(degree-1) down to x^0. Roots run from
    /// alpha^generator_base upward.
    pub fn compute_divisor(&self, degree: usize) -> Vec<u16> {
        debug_assert!(degree >= 1 && degree < self.size);
        let mut result = vec![0u16; degree];
        result[degree - 1] = 1;

        let mut root = self.exp_of(self.generator_base as usize);
        for _ in 0..degree {
            for j in 0..degree {
                result[j] = self.mul(result[j], root);
                if j + 1 < degree {
                    result[j] ^= result[j + 1];
                }
            }
            root = self.mul(root, 2);
        }
        result
    }
}

/// GF(256) over 0x11D, generator base 0 (QR and Micro QR).
pub fn qr_field() -> &'static GaloisField {
    static FIELD: OnceLock<GaloisField> = OnceLock::new();
    FIELD.get_or_init(|| GaloisField::new(256, 0x11D, 0))
}

/// GF(256) over 0x12D, generator base 1 (Data Matrix, Aztec 8-bit words).
pub fn data_matrix_field() -> &'static GaloisField {
    static FIELD: OnceLock<GaloisField> = OnceLock::new();
    FIELD.get_or_init(|| GaloisField::new(256, 0x12D, 1))
}

/// GF(16) over 0x13, generator base 1 (Aztec mode message).
pub fn aztec_param_field() -> &'static GaloisField {
    static FIELD: OnceLock<GaloisField> = OnceLock::new();
    FIELD.get_or_init(|| GaloisField::new(16, 0x13, 1))
}

/// GF(64) over 0x43, generator base 1 (Aztec 6-bit data words).
pub fn aztec_data6_field() -> &'static GaloisField {
    static FIELD: OnceLock<GaloisField> = OnceLock::new();
    FIELD.get_or_init(|| GaloisField::new(64, 0x43, 1))
}

/// GF(1024) over 0x409, generator base 1 (Aztec 10-bit data words).
pub fn aztec_data10_field() -> &'static GaloisField {
    static FIELD: OnceLock<GaloisField> = OnceLock::new();
    FIELD.get_or_init(|| GaloisField::new(1024, 0x409, 1))
}

/// GF(4096) over 0x1069, generator base 1 (Aztec 12-bit data words).
pub fn aztec_data12_field() -> &'static GaloisField {
    static FIELD: OnceLock<GaloisField> = OnceLock::new();
    FIELD.get_or_init(|| GaloisField::new(4096, 0x1069, 1))
}
