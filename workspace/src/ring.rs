#![allow(non_snake_case)]

use std::path::PathBuf;
use ndarray as nd;
use bose_hubbard::{ mkdir, write_npz };
use lib::systems::ring::*;

fn main() -> anyhow::Result<()> {
    lib::init_logging();
    let outdir = PathBuf::from("output/ring");
    mkdir!(outdir);

    let model = model()?;
    println!("hopping matrix:\n{:+.3}", model.hopping_matrix());

    let sector = model.sector(PARTICLES)?;
    let basis = sector.basis();
    println!("basis ({} states):\n{}", basis.size(), basis);

    let H = sector.hamiltonian();
    println!("nonzero entries ({}):", H.nnz());
    for (r, c, v) in H.iter() {
        println!("  ({:>2}, {:>2}) {:+.6}", r, c, v);
    }

    #[cfg(feature = "linalg")]
    {
        let (e0, psi) = sector.builder().ground_state()?;
        println!("ground state energy: {:+.6}", e0);
        println!("mean occupation: {:.4}", basis.mean_occupation(&psi)?);
    }

    let states: nd::Array2<u64> = basis.states().mapv(|n| n as u64);
    let rows: nd::Array1<u64> = H.rows().iter().map(|r| *r as u64).collect();
    let cols: nd::Array1<u64> = H.cols().iter().map(|c| *c as u64).collect();
    let re: nd::Array1<f64> = H.values().iter().map(|v| v.re).collect();
    let im: nd::Array1<f64> = H.values().iter().map(|v| v.im).collect();
    write_npz!(
        outdir.join("data.npz"),
        arrays: {
            "states" => &states,
            "rows" => &rows,
            "cols" => &cols,
            "values_re" => &re,
            "values_im" => &im,
            "nsites" => &nd::array![N_SITES as u32],
            "particles" => &nd::array![PARTICLES as u32],
            "hopping" => &nd::array![HOPPING],
            "interaction" => &nd::array![INTERACTION],
        }
    );

    println!("done");
    Ok(())
}
