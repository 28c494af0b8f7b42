/// Trial-division primality test.
///
/// Handles 2 and 3 directly, rejects their multiples, then tries divisors of
/// the form 6k-1 and 6k+1 while `i * i <= n`. The divisor runs in `u64` so the
/// final square cannot overflow for any `i64` input.
pub fn is_prime(n: i64) -> bool {
    if n < 2 {
        return false;
    }
    if n == 2 || n == 3 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }

    let n = n as u64;
    let mut i: u64 = 5;
    while i * i <= n {
        if n % i == 0 || n % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }

    true
}
