//! Ranges for every verification routine.

use serde::Serialize;

/// Mersenne prime exponents whose even perfect numbers are checked by default.
pub const PERFECT_EXPONENTS: [u64; 7] = [2, 3, 5, 7, 13, 17, 19];

/// Upper limits and parameter ranges for a verification run.
///
/// `n` limits are inclusive for the "n ≤ N" routines (bounds, sweeps) and
/// exclusive for the "n < N" searches (sparse primes, BCT-perfect odds).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerifyConfig {
    /// Theorems 1 and 2: n ≤ this.
    pub bound_max_n: u64,
    /// Theorem 3: n ≤ this.
    pub equality_max_n: u64,
    /// Theorems 4 and 5 and the triangle pattern: k in this inclusive range.
    pub mersenne_k: (u64, u64),
    /// Theorems 6 and 9: Fermat indices 0..=this.
    pub max_fermat_k: u32,
    /// Lemma 4: primes p < this.
    pub sparse_prime_limit: u64,
    /// Theorem 7: n ≤ this.
    pub sweep_max_n: u64,
    /// Proposition 5: odd k in this inclusive range.
    pub prop5_k: (u32, u32),
    /// Sequential vs parallel statistics: n ≤ this.
    pub schedule_max_n: u64,
    /// Theorem 8: Mersenne prime exponents.
    pub perfect_exponents: Vec<u64>,
    /// Power of two orthogonality: 1 ≤ a ≤ max_a, 1 ≤ m ≤ max_m.
    pub power_of_two_max_a: u32,
    pub power_of_two_max_m: u64,
    /// Binary generation: p in [2, this].
    pub binary_generation_max_p: u64,
    /// Theorems 10 and 11(b): n < this.
    pub structure_limit: u64,
    /// Conjecture 1 and Theorem 13: n < this.
    pub odd_abundance_limit: u64,
    /// Theorems 11(a) and 12: odd primes p < q < this.
    pub semiprime_max_p: u64,
    /// Lemma 3: even composites n < this.
    pub inheritance_limit: u64,
    /// Table 2: BCT-perfect composites n < this.
    pub classification_limit: u64,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            bound_max_n: 10_000,
            equality_max_n: 10_000,
            mersenne_k: (2, 15),
            max_fermat_k: 4,
            sparse_prime_limit: 100_000,
            sweep_max_n: 5_000,
            prop5_k: (3, 21),
            schedule_max_n: 10_000,
            perfect_exponents: PERFECT_EXPONENTS.to_vec(),
            power_of_two_max_a: 10,
            power_of_two_max_m: 100,
            binary_generation_max_p: 16,
            structure_limit: 100_000,
            odd_abundance_limit: 100_000,
            semiprime_max_p: 500,
            inheritance_limit: 10_000,
            classification_limit: 100_000,
        }
    }
}

impl VerifyConfig {
    /// The larger ranges used for the published tables.
    pub fn full() -> Self {
        Self {
            bound_max_n: 100_000,
            equality_max_n: 1_000_000,
            sparse_prime_limit: 1_000_000,
            sweep_max_n: 100_000,
            schedule_max_n: 100_000,
            binary_generation_max_p: 20,
            odd_abundance_limit: 1_000_000,
            semiprime_max_p: 1_000,
            inheritance_limit: 100_000,
            ..Self::default()
        }
    }

    /// Small ranges for a smoke test.
    pub fn quick() -> Self {
        Self {
            bound_max_n: 500,
            equality_max_n: 1_000,
            mersenne_k: (2, 8),
            max_fermat_k: 4,
            sparse_prime_limit: 1_000,
            sweep_max_n: 500,
            prop5_k: (3, 11),
            schedule_max_n: 1_000,
            perfect_exponents: vec![2, 3, 5, 7],
            power_of_two_max_a: 5,
            power_of_two_max_m: 50,
            binary_generation_max_p: 10,
            structure_limit: 1_000,
            odd_abundance_limit: 1_000,
            semiprime_max_p: 100,
            inheritance_limit: 1_000,
            classification_limit: 1_000,
        }
    }

    /// Override every limit on n (not the exponent or prime ranges).
    pub fn with_max_n(mut self, n: u64) -> Self {
        self.bound_max_n = n;
        self.equality_max_n = n;
        self.sweep_max_n = n;
        self.schedule_max_n = n;
        self.structure_limit = n;
        self.odd_abundance_limit = n;
        self.inheritance_limit = n;
        self.classification_limit = n;
        self
    }
}
