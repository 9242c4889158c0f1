#![allow(non_snake_case)]

use proptest::prelude::*;
use num_complex::Complex64 as C64;
use bose_hubbard::{ sector_size, BasisSet, Link, Model };

fn sector_params() -> impl Strategy<Value = (usize, usize)> {
    (1_usize..7, 0_usize..6)
}

// random lattice with between zero and eight complex links
fn model_strategy() -> impl Strategy<Value = Model> {
    (2_usize..6)
        .prop_flat_map(|sites| {
            let onsite = prop::collection::vec(-2.0_f64..2.0, sites);
            let link
                = (0..sites, 1..sites, -1.0_f64..1.0, -1.0_f64..1.0)
                .prop_map(move |(from, shift, re, im)| {
                    Link::new(from, (from + shift) % sites, C64::new(re, im))
                });
            let links = prop::collection::vec(link, 0..8);
            (onsite, links, 0.0_f64..4.0)
        })
        .prop_map(|(onsite, links, u)| Model::new(onsite, links, u).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn basis_size_and_round_trip((sites, particles) in sector_params()) {
        let basis = BasisSet::new(sites, particles).unwrap();
        prop_assert_eq!(Some(basis.size()), sector_size(sites, particles));
        for (k, state) in basis.iter().into_iter().enumerate() {
            prop_assert_eq!(state.sum(), particles);
            let v = state.to_vec();
            prop_assert_eq!(basis.index_of(&v).unwrap(), k);
        }
    }

    #[test]
    fn basis_is_strictly_ordered((sites, particles) in sector_params()) {
        let basis = BasisSet::new(sites, particles).unwrap();
        let states: Vec<Vec<usize>>
            = basis.iter().into_iter().map(|row| row.to_vec()).collect();
        for pair in states.windows(2) {
            prop_assert!(pair[0] > pair[1]);
        }
    }

    #[test]
    fn hamiltonian_is_hermitian(model in model_strategy(), particles in 0_usize..4) {
        let sector = model.sector(particles).unwrap();
        let H = sector.hamiltonian();
        prop_assert!(H.is_hermitian(1e-12));
        prop_assert_eq!(H.dim(), sector.dim());
    }

    #[test]
    fn hopping_conserves_particles(model in model_strategy(), particles in 1_usize..4) {
        let sector = model.sector(particles).unwrap();
        let basis = sector.basis();
        for (r, c, _) in sector.hamiltonian().iter() {
            let a = basis.vector_at(r).unwrap();
            let b = basis.vector_at(c).unwrap();
            prop_assert_eq!(a.sum(), b.sum());
            let moved: usize
                = a.iter().zip(b.iter())
                .map(|(x, y)| x.abs_diff(*y))
                .sum();
            prop_assert!(moved == 0 || moved == 2);
            prop_assert_eq!(moved == 0, r == c);
        }
    }

    #[test]
    fn parallel_assembly_matches_serial(model in model_strategy(), particles in 0_usize..4) {
        let sector = model.sector(particles).unwrap();
        let builder = sector.builder();
        prop_assert_eq!(builder.gen_sparse(), builder.gen_sparse_par());
    }

    #[test]
    fn single_particle_matches_hopping(model in model_strategy()) {
        let dense = model.sector(1).unwrap().dense_hamiltonian();
        let h = model.hopping_matrix();
        for (a, b) in dense.iter().zip(h.iter()) {
            prop_assert!((a - b).norm() < 1e-12);
        }
    }
}
