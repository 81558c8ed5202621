use parse_showers::{assemble, Scan, View};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "parse-showers",
    about = "Parsing air shower Cherenkov & X-ray flux scans"
)]
struct Opt {
    /// Path to the per-angle npz repository (expects <repo>/<view>_<altitude>_npz folders)
    #[structopt(long, default_value = "data")]
    repo: String,
    /// Path to the X-ray flux table store
    #[structopt(long, default_value = "data/xray")]
    store: String,
    /// Below-limb viewing geometry
    #[structopt(short, long)]
    below: bool,
    /// Write the assembled figure to this SVG file
    #[structopt(short, long)]
    plot: Option<String>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opt = Opt::from_args();

    let view = if opt.below { View::Below } else { View::Above };
    let scan = Scan::from_repo(view, &opt.repo, &opt.store);
    let figure = assemble(&scan)?;
    figure.summary();

    if let Some(path) = opt.plot {
        #[cfg(feature = "plot")]
        parse_showers::plot::render(&figure, view, &path);
        #[cfg(not(feature = "plot"))]
        log::warn!(
            "built without the `plot` feature, not writing {:?}",
            path
        );
    }

    Ok(())
}
