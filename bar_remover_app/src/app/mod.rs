mod arg_parse;

use bar_remover_lib::{remove_bars, DetectionCfg, RemovalCfg};
use clap::Parser;
use eyre::{ensure, WrapErr};

use arg_parse::Args;

pub fn run_app() -> i32 {
    let args = Args::parse();
    init_logger(&args);

    match run(&args) {
        Ok(()) => 0,
        Err(e) => {
            print_error(&e);
            1
        }
    }
}

fn run(args: &Args) -> eyre::Result<()> {
    ensure!(
        magick_cmdline_utils::required_tools_are_callable(),
        "convert/ffmpeg/ffprobe are not callable. Install ImageMagick and ffmpeg and make sure they are on the PATH"
    );

    let mut cfg = RemovalCfg::from_detection_cfg(DetectionCfg::default());
    cfg.debug = args.debug || args.plot_dir.is_some();
    cfg.plot_dir = args.plot_dir.clone();
    cfg.restore_audio = !args.no_audio;

    let crop = remove_bars(&args.input, &args.output, &cfg).wrap_err_with(|| {
        format!(
            "could not remove bars from {}",
            args.input.display()
        )
    })?;

    info!(
        "wrote {} cropped to {}",
        args.output.display(),
        crop.as_magick_geometry()
    );

    Ok(())
}

fn init_logger(args: &Args) {
    use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

    let level = if args.quiet {
        LevelFilter::Error
    } else if args.verbose || args.debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto).ok();
}

fn print_error(e: &eyre::Report) {
    #[allow(clippy::print_stderr)]
    let () = eprintln!("{e:?}");
}
