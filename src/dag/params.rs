//! Epoch and dataset size parameters

/// Blocks per epoch
pub const EPOCH_LENGTH: u64 = 30_000;

/// Dataset size at epoch 0
pub const DATASET_BYTES_INIT: u64 = 1 << 30;

/// Dataset growth per epoch
pub const DATASET_BYTES_GROWTH: u64 = 1 << 23;

/// Width of a mix in bytes; dataset sizes are multiples of this
pub const MIX_BYTES: u64 = 128;

/// Highest epoch a dataset size is computed for (about 17 GB of payload)
pub const MAX_EPOCH: u64 = 2048;

/// Epoch a block belongs to
pub fn epoch_of(block: u64) -> u64 {
    block / EPOCH_LENGTH
}

/// Dataset payload size for an epoch
///
/// Largest size below the linear growth target whose row count is prime, so
/// access patterns do not repeat early. Returns `None` past [`MAX_EPOCH`].
pub fn dataset_size(epoch: u64) -> Option<u64> {
    if epoch > MAX_EPOCH {
        return None;
    }
    let mut size = DATASET_BYTES_GROWTH
        .checked_mul(epoch)?
        .checked_add(DATASET_BYTES_INIT - MIX_BYTES)?;
    while !is_prime(size / MIX_BYTES) {
        size = size.checked_sub(2 * MIX_BYTES)?;
    }
    Some(size)
}

fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    let mut i = 3u64;
    while i * i <= n {
        if n % i == 0 {
            return false;
        }
        i += 2;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_boundaries() {
        assert_eq!(epoch_of(0), 0);
        assert_eq!(epoch_of(29_999), 0);
        assert_eq!(epoch_of(30_000), 1);
    }

    #[test]
    fn known_dataset_sizes() {
        assert_eq!(dataset_size(0), Some(1_073_739_904));
        assert_eq!(dataset_size(1), Some(1_082_130_304));
        assert_eq!(dataset_size(2), Some(1_090_514_816));
    }

    #[test]
    fn sizes_are_mix_aligned_and_growing() {
        let mut previous = 0;
        for epoch in 0..8 {
            let size = dataset_size(epoch).unwrap();
            assert_eq!(size % MIX_BYTES, 0);
            assert!(size > previous);
            previous = size;
        }
    }

    #[test]
    fn huge_epochs_have_no_size() {
        assert!(dataset_size(MAX_EPOCH).is_some());
        assert_eq!(dataset_size(MAX_EPOCH + 1), None);
        assert_eq!(dataset_size(u64::MAX / 2), None);
        assert_eq!(dataset_size(u64::MAX), None);
    }

    #[test]
    fn primality() {
        assert!(!is_prime(0));
        assert!(!is_prime(1));
        assert!(is_prime(2));
        assert!(is_prime(8_388_593));
        assert!(!is_prime(8_388_607));
    }
}
