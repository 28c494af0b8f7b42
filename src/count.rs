use crate::partition::Chunk;
use crate::prime::is_prime;

/// Counts primes in one chunk of `numbers`, touching nothing outside it.
pub fn count_chunk(numbers: &[i64], chunk: Chunk) -> u64 {
    count_primes(&numbers[chunk.range()])
}

/// Single pass over the whole sequence on the calling thread. This is the
/// reference result the parallel pass is checked against.
pub fn count_sequential(numbers: &[i64]) -> u64 {
    count_primes(numbers)
}

fn count_primes(numbers: &[i64]) -> u64 {
    let mut count = 0;
    for &n in numbers {
        if is_prime(n) {
            count += 1;
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_count() {
        assert_eq!(count_sequential(&[]), 0);
        assert_eq!(count_sequential(&[2, 3, 4, 5, -1, 0, 97]), 4);
        assert_eq!(count_sequential(&[7, 7, 7, -7]), 3);
    }

    #[test]
    fn test_sequential_is_repeatable() {
        let numbers: Vec<i64> = (-50..5000).collect();
        let first = count_sequential(&numbers);
        let second = count_sequential(&numbers);
        assert_eq!(first, second);
        assert_eq!(first, 669); // primes below 5000
    }

    #[test]
    fn test_chunk_only_sees_its_range() {
        let numbers = [4, 2, 3, 5, 6, 7];
        assert_eq!(count_chunk(&numbers, Chunk::new(0, 1)), 0);
        assert_eq!(count_chunk(&numbers, Chunk::new(1, 4)), 3);
        assert_eq!(count_chunk(&numbers, Chunk::new(4, 6)), 1);
        assert_eq!(count_chunk(&numbers, Chunk::new(3, 3)), 0);
    }
}
