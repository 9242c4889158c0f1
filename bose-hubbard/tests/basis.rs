use bose_hubbard::{
    BasisCache,
    BasisSet,
    BoseHubbardError,
    Compositions,
    OccupationEncoding,
    sector_size,
};

#[test]
fn sizes_follow_binomial() {
    for sites in 0..7 {
        for particles in 0..7 {
            let basis = BasisSet::new(sites, particles).unwrap();
            assert_eq!(Some(basis.size()), sector_size(sites, particles));
            assert_eq!(basis.states().dim(), (basis.size(), sites));
        }
    }
    assert_eq!(BasisSet::new(8, 2).unwrap().size(), 36);
    assert_eq!(BasisSet::new(0, 0).unwrap().size(), 1);
    assert!(BasisSet::new(0, 3).unwrap().is_empty());
}

#[test]
fn round_trip_every_state() {
    let basis = BasisSet::new(5, 4).unwrap();
    for k in 0..basis.size() {
        let v = basis.vector_at(k).unwrap().to_vec();
        assert_eq!(v.iter().sum::<usize>(), 4);
        assert_eq!(basis.index_of(&v).unwrap(), k);
    }
    for v in Compositions::new(5, 4) {
        let k = basis.index_of(&v).unwrap();
        assert_eq!(basis.vector_at(k).unwrap().to_vec(), v);
    }
}

#[test]
fn order_is_descending_lexicographic() {
    let basis = BasisSet::new(4, 3).unwrap();
    let states: Vec<Vec<usize>>
        = basis.iter().into_iter().map(|row| row.to_vec()).collect();
    assert_eq!(states.first().unwrap(), &vec![3, 0, 0, 0]);
    assert_eq!(states.last().unwrap(), &vec![0, 0, 0, 3]);
    for pair in states.windows(2) {
        assert!(pair[0] > pair[1], "{:?} should precede {:?}", pair[0], pair[1]);
    }
}

#[test]
fn single_particle_sector_is_site_order() {
    let basis = BasisSet::new(6, 1).unwrap();
    for k in 0..6 {
        let v = basis.vector_at(k).unwrap();
        assert_eq!(v[k], 1);
        assert_eq!(v.sum(), 1);
    }
}

#[test]
fn lookups_fail_loudly() {
    let basis = BasisSet::new(3, 2).unwrap();
    assert!(matches!(
        basis.vector_at(6),
        Err(BoseHubbardError::OutOfRange { index: 6, size: 6 })
    ));
    assert!(matches!(
        basis.index_of(&[2, 0]),
        Err(BoseHubbardError::NotInBasis { sites: 3, particles: 2, .. })
    ));
    assert!(matches!(
        basis.index_of(&[2, 0, 1]),
        Err(BoseHubbardError::NotInBasis { .. })
    ));
    assert!(!basis.contains(&[0, 0, 0]));
    assert!(basis.contains(&[0, 1, 1]));
}

#[test]
fn encoding_agrees_with_basis() {
    let basis = BasisSet::new(4, 4).unwrap();
    let enc = OccupationEncoding::new(4, 4).unwrap();
    assert_eq!(basis.encoding(), &enc);
    for k in 0..basis.size() {
        assert_eq!(enc.unrank(k).unwrap(), basis.vector_at(k).unwrap().to_vec());
    }
    assert!(enc.unrank(basis.size()).is_err());
}

#[test]
fn enumeration_is_deterministic() {
    let a = BasisSet::new(7, 3).unwrap();
    let b = BasisSet::new(7, 3).unwrap();
    assert_eq!(a, b);
    let mut cache = BasisCache::new();
    let c = cache.get_or_build(7, 3).unwrap();
    assert_eq!(*c, a);
}

#[test]
fn oversized_sectors_are_rejected() {
    assert!(matches!(
        BasisSet::new(300, 300),
        Err(BoseHubbardError::InvalidSector { sites: 300, particles: 300, .. })
    ));
}

#[test]
fn many_particles_on_few_sites() {
    let m = usize::MAX / 4;
    assert_eq!(sector_size(1, m), Some(1));
    let basis = BasisSet::new(1, m).unwrap();
    assert_eq!(basis.size(), 1);
    assert_eq!(bose_hubbard::rank(&[m]).unwrap(), 0);
    assert!(matches!(
        BasisSet::new(2, m),
        Err(BoseHubbardError::InvalidSector { .. })
    ));
    assert_eq!(BasisSet::new(2, 1000).unwrap().size(), 1001);
}
