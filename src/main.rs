use clap::{Args, Parser, Subcommand};
use error_stack::{Result, ResultExt};
use error_stack_derive::ErrorStack;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use robust_spn_anim::config::{RenderConfig, ResolutionPreset};
use robust_spn_anim::dieface::{compute_dot_anchors, face_anchors, DieFaceStyle};
use robust_spn_anim::probability::{column_marginals, fair_die, joint, joint_table_len, row_marginals};
use robust_spn_anim::storyboard::{die_faces_scene, intro_row_scene, intro_scene};
use robust_spn_anim::table::{JointTable, ProbabilityLabelSource, ProbabilityTable, ProbabilityTableOptions, TableCell};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, ErrorStack)]
#[error_message("Error occured in main fn")]
pub struct MainError;

/// Dice illustrations for (robust) sum-product networks
#[derive(Parser)]
#[command(name = "robust-spn-anim", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the pip positions of a die face in its unit square
    Anchors {
        /// Face value, 1 to 6
        #[arg(allow_hyphen_values = true)]
        value: i32,
        /// Pull pips toward the centre, 1 keeps them on the anchors, 0 stacks them
        #[arg(long, default_value_t = 1.0)]
        coalesce: f64,
    },
    /// Write a PNG of a row of die faces
    Still {
        #[arg(long, value_delimiter = ',', default_value = "1,2,3,4,5,6", allow_hyphen_values = true)]
        values: Vec<i32>,
        #[arg(short, long, default_value = "output/dice.png")]
        output: PathBuf,
        /// Animate the row like the intro and capture it this many seconds in
        #[arg(long)]
        time: Option<f64>,
        #[command(flatten)]
        output_args: OutputArgs,
    },
    /// Render the intro scene to an h264 stream
    Render {
        #[arg(long, default_value_t = 30)]
        fps: usize,
        #[arg(long, default_value_t = 4.0)]
        seconds: f64,
        #[arg(short, long, default_value = "output/intro.h264")]
        output: PathBuf,
        /// Wrap the stream in an mp4 through ffmpeg
        #[arg(long)]
        mp4: bool,
        #[command(flatten)]
        output_args: OutputArgs,
    },
    /// Print the probability table of a fair die
    Table {
        #[arg(long)]
        transpose: bool,
        #[arg(long)]
        flip: bool,
        #[arg(long)]
        no_labels: bool,
        /// Print the two-dice joint table and its marginals instead
        #[arg(long)]
        joint: bool,
    },
}

#[derive(Args)]
struct OutputArgs {
    #[arg(long, value_enum, default_value_t = ResolutionPreset::P720)]
    resolution: ResolutionPreset,
    /// Dot coalesce factor of every face
    #[arg(long, default_value_t = 0.5)]
    coalesce: f64,
}

impl OutputArgs {
    fn config(&self) -> RenderConfig {
        RenderConfig {
            resolution: self.resolution.resolution(),
            style: DieFaceStyle {
                dot_coalesce_factor: self.coalesce,
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
}

fn describe(cell: &TableCell) -> String {
    match cell {
        TableCell::Face(face) => format!("[{}]", face.value()),
        TableCell::Probability(text) | TableCell::Header(text) => text.clone(),
    }
}

fn print_rows(rows: &[Vec<TableCell>]) {
    for row in rows {
        println!("{}", row.iter().map(describe).collect::<Vec<_>>().join("\t"));
    }
}

fn marginal_lines(distribution: &[Vec<f64>]) -> Vec<String> {
    vec![
        format!("row marginals:\t{:?}", row_marginals(distribution)),
        format!("column marginals:\t{:?}", column_marginals(distribution)),
    ]
}

fn main() -> Result<(), MainError> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Anchors { value, coalesce } => {
            let points = compute_dot_anchors(value, coalesce)
                .change_context(MainError)
                .attach_printable_lazy(|| format!("Could not lay out face {}", value))?;
            let anchors = face_anchors(value).change_context(MainError)?;
            for (anchor, point) in anchors.iter().zip(points) {
                println!("{:?}\t{}", anchor, point);
            }
        }
        Command::Still { values, output, time, output_args } => {
            let config = RenderConfig {
                length: Duration::ZERO,
                ..output_args.config()
            };
            let (scene, time) = match time {
                Some(seconds) => {
                    let time = Duration::try_from_secs_f64(seconds)
                        .map_err(|_| error_stack::Report::new(MainError))
                        .attach_printable_lazy(|| format!("Invalid still time {} seconds", seconds))?;
                    (intro_row_scene(&config, values), time)
                }
                None => (die_faces_scene(&config, values), Duration::ZERO),
            };
            scene
                .change_context(MainError)?
                .render_still(time, &output)
                .change_context(MainError)
                .attach_printable_lazy(|| "Failed to write still")?;
        }
        Command::Render { fps, seconds, output, mp4, output_args } => {
            let length = Duration::try_from_secs_f64(seconds)
                .map_err(|_| error_stack::Report::new(MainError))
                .attach_printable_lazy(|| format!("Invalid scene length {} seconds", seconds))?;
            let config = RenderConfig {
                fps,
                length,
                output,
                mp4,
                ..output_args.config()
            };
            debug!(?config, "render configuration");
            let path = intro_scene(&config)
                .change_context(MainError)?
                .render()
                .change_context(MainError)
                .attach_printable_lazy(|| "Failed to render intro scene")?;
            info!(path = %path.display(), "done");
        }
        Command::Table { transpose, flip, no_labels, joint: show_joint } => {
            if show_joint {
                let table = JointTable::fair(DieFaceStyle::default()).change_context(MainError)?;
                print_rows(table.rows());
                let distribution = joint(&fair_die(), &fair_die()).change_context(MainError)?;
                println!();
                marginal_lines(&distribution).iter().for_each(|line| println!("{line}"));
                for dice in 1..=10 {
                    if let Some(len) = joint_table_len(dice) {
                        println!("6^{dice} = {len}");
                    }
                }
            } else {
                let options = ProbabilityTableOptions {
                    transpose,
                    flip,
                    labels: !no_labels,
                    ..Default::default()
                };
                let table = ProbabilityTable::build(&ProbabilityLabelSource::default(), &options)
                    .change_context(MainError)?;
                print_rows(table.rows());
            }
        }
    }
    Ok(())
}
