//! Sieve of Eratosthenes.

/// All primes strictly below `bound`, ascending.
pub fn sieve_of_eratosthenes(bound: u64) -> Vec<u64> {
    if bound < 3 {
        return Vec::new();
    }

    let mut composite = vec![false; bound as usize];
    let mut primes = Vec::new();

    for i in 2..bound {
        if composite[i as usize] {
            continue;
        }
        primes.push(i);

        let mut j = i.saturating_mul(i);
        while j < bound {
            composite[j as usize] = true;
            j += i;
        }
    }

    primes
}
