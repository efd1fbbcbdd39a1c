//! The prime field GF(929) used by PDF417, with the Euclidean-algorithm
//! error corrector.
//!
//! Unlike the binary-extension fields, addition here is modular rather than
//! XOR, so the corrector lives apart from the shared [`ReedSolomon`]
//! engine.
//!
//! [`ReedSolomon`]: super::reed_solomon::ReedSolomon

use std::sync::OnceLock;

/// Field modulus
pub const MODULUS: i32 = 929;
const GENERATOR: i32 = 3;

struct Tables {
    exp: [i32; MODULUS as usize],
    log: [i32; MODULUS as usize],
}

fn tables() -> &'static Tables {
    static TABLES: OnceLock<Tables> = OnceLock::new();
    TABLES.get_or_init(|| {
        let mut exp = [0i32; MODULUS as usize];
        let mut log = [0i32; MODULUS as usize];
        let mut x = 1i32;
        for (i, e) in exp.iter_mut().enumerate() {
            *e = x;
            log[x as usize] = i as i32;
            x = (x * GENERATOR) % MODULUS;
        }
        Tables { exp, log }
    })
}

pub(crate) fn add(a: i32, b: i32) -> i32 {
    (a + b) % MODULUS
}

pub(crate) fn subtract(a: i32, b: i32) -> i32 {
    (MODULUS + a - b) % MODULUS
}

pub(crate) fn multiply(a: i32, b: i32) -> i32 {
    if a == 0 || b == 0 {
        return 0;
    }
    let t = tables();
    t.exp[((t.log[a as usize] + t.log[b as usize]) % (MODULUS - 1)) as usize]
}

pub(crate) fn exp(power: i32) -> i32 {
    tables().exp[(power.rem_euclid(MODULUS - 1)) as usize]
}

pub(crate) fn log(value: i32) -> i32 {
    debug_assert!(value != 0);
    tables().log[value as usize]
}

pub(crate) fn inverse(value: i32) -> i32 {
    debug_assert!(value != 0);
    exp(MODULUS - 1 - log(value))
}

/// Polynomial over GF(929); coefficients run highest degree first.
#[derive(Clone)]
struct Poly {
    coefficients: Vec<i32>,
}

impl Poly {
    fn new(coefficients: Vec<i32>) -> Self {
        // Strip leading zeros, keeping at least one coefficient.
        let first_non_zero = coefficients
            .iter()
            .position(|&c| c != 0)
            .unwrap_or(coefficients.len() - 1);
        Self {
            coefficients: coefficients[first_non_zero..].to_vec(),
        }
    }

    fn zero() -> Self {
        Self {
            coefficients: vec![0],
        }
    }

    fn monomial(degree: usize, coefficient: i32) -> Self {
        if coefficient == 0 {
            return Self::zero();
        }
        let mut coefficients = vec![0; degree + 1];
        coefficients[0] = coefficient;
        Self { coefficients }
    }

    fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    fn is_zero(&self) -> bool {
        self.coefficients[0] == 0
    }

    fn coefficient(&self, degree: usize) -> i32 {
        self.coefficients[self.coefficients.len() - 1 - degree]
    }

    fn evaluate_at(&self, x: i32) -> i32 {
        if x == 0 {
            return self.coefficient(0);
        }
        let mut result = 0;
        for &c in &self.coefficients {
            result = add(multiply(result, x), c);
        }
        result
    }

    fn add_poly(&self, other: &Poly) -> Poly {
        if self.is_zero() {
            return other.clone();
        }
        if other.is_zero() {
            return self.clone();
        }
        let (smaller, larger) = if self.coefficients.len() <= other.coefficients.len() {
            (&self.coefficients, &other.coefficients)
        } else {
            (&other.coefficients, &self.coefficients)
        };
        let diff = larger.len() - smaller.len();
        let mut sum = larger[..diff].to_vec();
        for i in 0..smaller.len() {
            sum.push(add(smaller[i], larger[diff + i]));
        }
        Poly::new(sum)
    }

    fn subtract_poly(&self, other: &Poly) -> Poly {
        if other.is_zero() {
            return self.clone();
        }
        self.add_poly(&other.negative())
    }

    fn multiply_poly(&self, other: &Poly) -> Poly {
        if self.is_zero() || other.is_zero() {
            return Poly::zero();
        }
        let a = &self.coefficients;
        let b = &other.coefficients;
        let mut product = vec![0; a.len() + b.len() - 1];
        for (i, &ac) in a.iter().enumerate() {
            for (j, &bc) in b.iter().enumerate() {
                product[i + j] = add(product[i + j], multiply(ac, bc));
            }
        }
        Poly::new(product)
    }

    fn multiply_by_monomial(&self, degree: usize, coefficient: i32) -> Poly {
        if coefficient == 0 {
            return Poly::zero();
        }
        let mut product: Vec<i32> = self
            .coefficients
            .iter()
            .map(|&c| multiply(c, coefficient))
            .collect();
        product.extend(std::iter::repeat_n(0, degree));
        Poly::new(product)
    }

    fn scale(&self, value: i32) -> Poly {
        Poly::new(
            self.coefficients
                .iter()
                .map(|&c| multiply(c, value))
                .collect(),
        )
    }

    fn negative(&self) -> Poly {
        Poly::new(self.coefficients.iter().map(|&c| subtract(0, c)).collect())
    }
}

/// Correct up to `ec_count / 2` errors in a PDF417 codeword stream in
/// place. Returns the number of corrected codewords, or `None` when the
/// stream is uncorrectable.
pub fn correct_in_place(received: &mut [i32], ec_count: usize) -> Option<usize> {
    if ec_count == 0 || ec_count >= received.len() {
        return None;
    }
    if received.iter().any(|&c| !(0..MODULUS).contains(&c)) {
        return None;
    }

    let poly = Poly::new(received.to_vec());
    let mut syndromes = vec![0i32; ec_count];
    let mut has_error = false;
    for i in (1..=ec_count).rev() {
        let eval = poly.evaluate_at(exp(i as i32));
        syndromes[ec_count - i] = eval;
        if eval != 0 {
            has_error = true;
        }
    }
    if !has_error {
        return Some(0);
    }

    let syndrome = Poly::new(syndromes);
    let (sigma, omega) = run_euclidean(Poly::monomial(ec_count, 1), syndrome, ec_count)?;

    let locations = find_error_locations(&sigma)?;
    if locations.len() > ec_count / 2 {
        return None;
    }
    let magnitudes = find_error_magnitudes(&omega, &sigma, &locations);

    for (i, &loc) in locations.iter().enumerate() {
        let position = received.len() as i32 - 1 - log(loc);
        if position < 0 {
            return None;
        }
        let position = position as usize;
        received[position] = subtract(received[position], magnitudes[i]);
    }

    // Re-derive syndromes to reject miscorrections.
    let check = Poly::new(received.to_vec());
    if !(1..=ec_count).all(|i| check.evaluate_at(exp(i as i32)) == 0) {
        return None;
    }
    Some(locations.len())
}

fn run_euclidean(a: Poly, b: Poly, r: usize) -> Option<(Poly, Poly)> {
    let (mut r_last, mut r_curr) = if a.degree() < b.degree() { (b, a) } else { (a, b) };
    let mut t_last = Poly::zero();
    let mut t_curr = Poly::monomial(0, 1);

    while r_curr.degree() >= r / 2 && !r_curr.is_zero() {
        let r_last_last = r_last;
        let t_last_last = t_last;
        r_last = r_curr;
        t_last = t_curr;

        if r_last.is_zero() {
            return None;
        }

        r_curr = r_last_last;
        let mut q = Poly::zero();
        let dlt_inverse = inverse(r_last.coefficient(r_last.degree()));
        while r_curr.degree() >= r_last.degree() && !r_curr.is_zero() {
            let degree_diff = r_curr.degree() - r_last.degree();
            let scale = multiply(r_curr.coefficient(r_curr.degree()), dlt_inverse);
            q = q.add_poly(&Poly::monomial(degree_diff, scale));
            r_curr = r_curr.subtract_poly(&r_last.multiply_by_monomial(degree_diff, scale));
        }

        t_curr = q.multiply_poly(&t_last).subtract_poly(&t_last_last).negative();
    }

    let sigma_tilde_at_zero = t_curr.coefficient(0);
    if sigma_tilde_at_zero == 0 {
        return None;
    }

    let inv = inverse(sigma_tilde_at_zero);
    Some((t_curr.scale(inv), r_curr.scale(inv)))
}

fn find_error_locations(error_locator: &Poly) -> Option<Vec<i32>> {
    let num_errors = error_locator.degree();
    let mut result = Vec::with_capacity(num_errors);
    for i in 1..MODULUS {
        if result.len() == num_errors {
            break;
        }
        if error_locator.evaluate_at(i) == 0 {
            result.push(inverse(i));
        }
    }
    if result.len() != num_errors {
        return None;
    }
    Some(result)
}

fn find_error_magnitudes(omega: &Poly, sigma: &Poly, locations: &[i32]) -> Vec<i32> {
    let degree = sigma.degree();
    if degree < 1 {
        return Vec::new();
    }
    let mut deriv_coefficients = vec![0i32; degree];
    for i in 1..=degree {
        deriv_coefficients[degree - i] = multiply(i as i32 % MODULUS, sigma.coefficient(i));
    }
    let derivative = Poly::new(deriv_coefficients);

    locations
        .iter()
        .map(|&loc| {
            let xi_inverse = inverse(loc);
            let numerator = subtract(0, omega.evaluate_at(xi_inverse));
            let denominator = inverse(derivative.evaluate_at(xi_inverse));
            multiply(numerator, denominator)
        })
        .collect()
}

/// Append `ec_count` parity codewords to a PDF417 data stream.
///
/// Generator roots run 3^1 .. 3^ec_count, matching the syndromes used by
/// [`correct_in_place`].
pub fn generate_parity(data: &[i32], ec_count: usize) -> Vec<i32> {
    // g(x) = product (x - 3^i) for i in 1..=ec_count
    let mut generator = vec![1i32];
    for i in 1..=ec_count {
        let root = exp(i as i32);
        let mut next = vec![0i32; generator.len() + 1];
        for (j, &g) in generator.iter().enumerate() {
            next[j] = add(next[j], g);
            next[j + 1] = subtract(next[j + 1], multiply(g, root));
        }
        generator = next;
    }

    // Synthetic division of data * x^ec_count by g(x).
    let mut remainder = vec![0i32; ec_count];
    for &d in data {
        let factor = add(d, remainder[0]);
        remainder.rotate_left(1);
        remainder[ec_count - 1] = 0;
        for j in 0..ec_count {
            // generator[0] is monic; skip it
            remainder[j] = subtract(remainder[j], multiply(generator[j + 1], factor));
        }
    }

    // Parity symbols are the negated remainder.
    remainder.iter().map(|&r| subtract(0, r)).collect()
}
