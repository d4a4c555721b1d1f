//! Binary Convolution Theory invariant engine.
//!
//! For a factorization n = a × b the pre-carry convolution of the binary
//! digit sequences of a and b records how many bit products land on each
//! position. Three invariants are read off it:
//!
//! - **H** (height): the largest coefficient.
//! - **C** (carry count): total excess of the coefficients over 1.
//! - **L** (chain length): passes needed to normalize the coefficients to
//!   bits, under a sequential sweep, plus **L_parallel** under synchronous
//!   rounds.
//!
//! A pair is orthogonal when H = 1, and n is BCT-perfect when all of its
//! non-trivial factorizations are orthogonal.
//!
//! All integers are [`num_bigint::BigUint`]; every fallible operation returns
//! [`Result`] with a [`BctError`].

pub mod carry;
pub mod convolution;
pub mod digits;
pub mod divisors;
pub mod error;
pub mod invariants;
pub mod perfectness;

pub use carry::{normalize, CarrySchedule, Normalization, PARALLEL_ROUND_LIMIT, SEQUENTIAL_SWEEP_LIMIT};
pub use convolution::{binary_convolution, Convolution};
pub use digits::{
    binary_string, bit_length, bit_positions, digit_sequence, fermat, fermat_index,
    is_centrally_symmetric, is_power_of_two, mersenne, mersenne_exponent, popcount,
    FERMAT_PRIMES,
};
pub use divisors::{
    abundance_ratio, factorizations, is_prime, prime_factorization, primes_below, sigma,
};
pub use error::{BctError, Result};
pub use invariants::{
    analyze_factorizations, bct_invariants, carry_count, chain_length, chain_length_of, height,
    parallel_chain_length, parallel_chain_length_of, self_height, BctInvariants,
    FactorizationProfile,
};
pub use perfectness::{is_bct_perfect, is_orthogonal};
