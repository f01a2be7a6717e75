//! Tests for `PatternBitset` set algebra and enumeration

#[cfg(test)]
mod tests {
    use wavetile::algorithm::bitset::PatternBitset;

    // Verifies a new bitset is empty and an all-bitset is full
    // Verified by initializing with the opposite fill value
    #[test]
    fn test_new_and_all() {
        let empty = PatternBitset::new(12);
        assert!(empty.is_empty());
        assert_eq!(empty.count(), 0);

        let full = PatternBitset::all(12);
        assert!(!full.is_empty());
        assert_eq!(full.count(), 12);
        for index in 0..12 {
            assert!(full.contains(index));
        }
    }

    // Tests insertion round-trips through to_vec in ascending order
    // Verified by shuffling insertion order against the expected output
    #[test]
    fn test_round_trip_ascending() {
        let mut bitset = PatternBitset::new(10);
        for index in [7, 0, 3, 9, 3] {
            bitset.insert(index);
        }
        assert_eq!(bitset.to_vec(), vec![0, 3, 7, 9]);
        assert_eq!(bitset.count(), 4);
        assert_eq!(bitset.first(), Some(0));
    }

    // Tests membership beyond a single 32-bit word
    // Verified by restricting storage to one machine word
    #[test]
    fn test_beyond_one_word() {
        let mut bitset = PatternBitset::new(40);
        bitset.insert(35);
        assert_eq!(bitset.to_vec(), vec![35]);
        assert!(bitset.contains(35));
        assert!(!bitset.contains(3));
    }

    // Tests intersection equals the sorted intersection of the enumerations
    // Verified by changing the intersection operation to a union
    #[test]
    fn test_intersection_matches_enumeration() {
        let set1 = PatternBitset::from_indices(&[1, 3, 5, 8], 10);
        let set2 = PatternBitset::from_indices(&[3, 5, 7], 10);

        let intersection = set1.intersection(&set2);
        assert_eq!(intersection.to_vec(), vec![3, 5]);

        let mut in_place = set1.clone();
        in_place.intersect_with(&set2);
        assert_eq!(in_place, intersection);
    }

    // Tests union adds exactly the other set's members
    // Verified by removing the word-wise OR
    #[test]
    fn test_union() {
        let mut set1 = PatternBitset::from_indices(&[0, 4], 10);
        let set2 = PatternBitset::from_indices(&[4, 9], 10);
        set1.union_with(&set2);
        assert_eq!(set1.to_vec(), vec![0, 4, 9]);
    }

    // Tests equality follows from identical enumerations
    // Verified by comparing sets built in different insertion orders
    #[test]
    fn test_equality() {
        let set1 = PatternBitset::from_indices(&[2, 6], 10);
        let set2 = PatternBitset::from_indices(&[6, 2], 10);
        let set3 = PatternBitset::from_indices(&[2, 7], 10);
        assert_eq!(set1, set2);
        assert_ne!(set1, set3);

        let copy = set1.clone();
        assert_eq!(copy, set1);
    }

    // Tests out-of-range insertions are ignored rather than resizing
    // Verified by removing the bounds guard in insert
    #[test]
    fn test_out_of_range_insert_ignored() {
        let mut bitset = PatternBitset::new(5);
        bitset.insert(5);
        bitset.insert(100);
        assert!(bitset.is_empty());
    }

    // Tests the zero-bit bitset is trivially empty
    // Verified by constructing with no storage at all
    #[test]
    fn test_zero_bits() {
        let bitset = PatternBitset::new(0);
        assert!(bitset.is_empty());
        assert_eq!(bitset.count(), 0);
        assert_eq!(bitset.first(), None);
        assert_eq!(bitset.to_vec(), Vec::<usize>::new());
    }

    // Tests clear zeroes every word
    // Verified by clearing a set spanning multiple words
    #[test]
    fn test_clear() {
        let mut bitset = PatternBitset::from_indices(&[0, 31, 32, 63], 64);
        assert_eq!(bitset.count(), 4);
        bitset.clear();
        assert!(bitset.is_empty());
    }
}
