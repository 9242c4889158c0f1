#![allow(non_snake_case)]

use std::path::PathBuf;
use itertools::{ Itertools, MinMaxResult };
use ndarray as nd;
use rayon::iter::{ IntoParallelIterator, ParallelIterator };
use bose_hubbard::{ mkdir, write_npz, BasisSet, HBuilder };
use lib::systems::disordered::*;

const N_SAMPLES: u64 = 256;

#[derive(Copy, Clone, Debug)]
struct Sample {
    nnz: usize,
    spread: f64,
}

fn main() -> anyhow::Result<()> {
    lib::init_logging();
    let outdir = PathBuf::from("output/disorder");
    mkdir!(outdir);

    let params = DisorderParams::default();
    let basis = BasisSet::new(params.sites, PARTICLES)?;
    tracing::info!(dim = basis.size(), samples = N_SAMPLES, "starting ensemble");

    let samples: Vec<Sample>
        = (0..N_SAMPLES).into_par_iter()
        .map(|seed| -> anyhow::Result<Sample> {
            let model = params.model(seed)?;
            let builder = HBuilder::new(&basis, &model)?;
            let H = builder.gen_sparse();
            let spread
                = match builder.diagonal().iter().minmax() {
                    MinMaxResult::MinMax(lo, hi) => hi - lo,
                    _ => 0.0,
                };
            Ok(Sample { nnz: H.nnz(), spread })
        })
        .collect::<anyhow::Result<_>>()?;

    let nnz: nd::Array1<u64> = samples.iter().map(|s| s.nnz as u64).collect();
    let spread: nd::Array1<f64> = samples.iter().map(|s| s.spread).collect();
    println!("mean nnz: {:.2}", nnz.mapv(|n| n as f64).mean().unwrap_or(0.0));
    println!("mean diagonal spread: {:.4}", spread.mean().unwrap_or(0.0));

    write_npz!(
        outdir.join("ensemble.npz"),
        arrays: {
            "nnz" => &nnz,
            "spread" => &spread,
            "nsites" => &nd::array![params.sites as u32],
            "particles" => &nd::array![PARTICLES as u32],
            "disorder" => &nd::array![params.disorder],
        }
    );

    println!("done");
    Ok(())
}
