#![allow(non_snake_case)]

use std::path::PathBuf;
use anyhow::anyhow;
use ndarray as nd;
use bose_hubbard::{
    mkdir,
    write_npz,
    BasisCache,
    ModelConfig,
    ValidatedConfig,
};

fn main() -> anyhow::Result<()> {
    lib::init_logging();
    let path: PathBuf
        = std::env::args_os().nth(1)
        .map(PathBuf::from)
        .ok_or_else(|| anyhow!("usage: from_config <model.toml>"))?;
    let stem
        = path.file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| anyhow!("bad config path {}", path.display()))?;
    let outdir = PathBuf::from("output").join(stem);
    mkdir!(outdir);

    let ValidatedConfig { model, sectors }
        = ModelConfig::from_file(&path)?.validate()?;
    tracing::info!(
        sites = model.num_sites(),
        links = model.links().len(),
        real = model.is_real(),
        "loaded {}", path.display()
    );

    let mut cache = BasisCache::new();
    for m in sectors.into_iter() {
        let sector = model.sector_cached(m, &mut cache)?;
        let H = sector.builder().gen_sparse_par();
        tracing::info!(particles = m, dim = sector.dim(), nnz = H.nnz(), "sector done");

        let states: nd::Array2<u64> = sector.basis().states().mapv(|n| n as u64);
        let rows: nd::Array1<u64> = H.rows().iter().map(|r| *r as u64).collect();
        let cols: nd::Array1<u64> = H.cols().iter().map(|c| *c as u64).collect();
        let re: nd::Array1<f64> = H.values().iter().map(|v| v.re).collect();
        let im: nd::Array1<f64> = H.values().iter().map(|v| v.im).collect();
        write_npz!(
            outdir.join(format!("sector_{}.npz", m)),
            arrays: {
                "states" => &states,
                "rows" => &rows,
                "cols" => &cols,
                "values_re" => &re,
                "values_im" => &im,
            }
        );
    }

    println!("done");
    Ok(())
}
