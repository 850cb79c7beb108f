use clap::{Args, Parser, Subcommand};
use log::{info, warn};
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use wm_client::display::{print_colored_grid, print_grid_header};
use wm_client::routes::previous_model_path;
use wm_client::{
    ClientConfig, ConsolePresenter, ProjectForm, ProjectSubmitter, ShapeEditor, ShapeGrid,
    SubmissionTask, Transport, UreqTransport,
};

const BANNER: &str = r#"
  ██╗    ██╗███╗   ███╗
  ██║    ██║████╗ ████║
  ██║ █╗ ██║██╔████╔██║
  ██║███╗██║██║╚██╔╝██║
  ╚███╔███╔╝██║ ╚═╝ ██║
   ╚══╝╚══╝ ╚═╝     ╚═╝  water-modelling client
"#;

/// Command-line client for the water-modelling wizard
#[derive(Parser)]
#[command(name = "wm_client")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Define model shapes and create projects from the terminal", long_about = None)]
struct Cli {
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG wins when set
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Override the server base URL
    #[arg(long)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Paint a shape for one model and submit it
    Shapes(ShapesArgs),
    /// Show where the back button of a model page leads
    Back {
        #[arg(long)]
        model_index: usize,
    },
    /// Validate and submit the create-project form
    Project(ProjectArgs),
}

#[derive(Args)]
struct ShapesArgs {
    /// Wizard step (hydrus model index)
    #[arg(long)]
    model_index: usize,

    /// Grid rows; defaults to the configured grid size
    #[arg(long)]
    rows: Option<usize>,

    /// Grid columns; defaults to the configured grid size
    #[arg(long)]
    cols: Option<usize>,

    /// Start from a saved mask (JSON 2-D array of 0/1)
    #[arg(long)]
    from: Option<PathBuf>,

    /// Cell to toggle as ROW,COL; repeatable
    #[arg(short, long, value_parser = parse_cell)]
    toggle: Vec<(usize, usize)>,

    /// Print the request body instead of sending it
    #[arg(long)]
    dry_run: bool,
}

#[derive(Args)]
struct ProjectArgs {
    /// Form values as JSON (`name`, `lat`, `long`, `startDate`, `endDate`)
    #[arg(long)]
    form: Option<PathBuf>,

    #[arg(long)]
    name: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    lat: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    long: Option<String>,

    #[arg(long)]
    start_date: Option<String>,

    #[arg(long)]
    end_date: Option<String>,

    /// Validate only
    #[arg(long)]
    dry_run: bool,
}

fn parse_cell(value: &str) -> Result<(usize, usize), String> {
    let (row, col) = value
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL, got '{}'", value))?;
    let row = row
        .trim()
        .parse()
        .map_err(|_| format!("invalid row in '{}'", value))?;
    let col = col
        .trim()
        .parse()
        .map_err(|_| format!("invalid column in '{}'", value))?;
    Ok((row, col))
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(cli.log_level.as_str()),
    )
    .init();

    let mut config = ClientConfig::load(cli.config.as_deref())?;
    if let Some(base_url) = cli.base_url {
        config.server.base_url = base_url;
        config.validate()?;
    }

    println!("{}", BANNER);

    match cli.command {
        Commands::Shapes(args) => run_shapes(&config, args),
        Commands::Back { model_index } => {
            println!("⬅️ Back leads to {}", previous_model_path(model_index));
            Ok(())
        }
        Commands::Project(args) => run_project(&config, args),
    }
}

fn run_shapes(config: &ClientConfig, args: ShapesArgs) -> Result<(), Box<dyn Error>> {
    let grid = match &args.from {
        Some(path) => {
            let rows: Vec<Vec<u8>> = serde_json::from_str(&std::fs::read_to_string(path)?)?;
            ShapeGrid::from_rows(rows)?
        }
        None => ShapeGrid::new(
            args.rows.unwrap_or(config.grid.rows),
            args.cols.unwrap_or(config.grid.cols),
        )?,
    };

    let transport: Arc<dyn Transport> = Arc::new(UreqTransport::from_config(config));
    let mut presenter = ConsolePresenter::new(&config.server.base_url, config.display.use_color);
    let mut editor = ShapeEditor::new(config, args.model_index, grid, transport);

    for (row, col) in args.toggle {
        editor.toggle_cell(row, col, &mut presenter)?;
    }

    print_grid_header(editor.model_index(), editor.grid());
    print_colored_grid(editor.grid(), config.display.use_color)?;

    if args.dry_run {
        println!("{}", editor.grid().to_json()?);
        return Ok(());
    }

    let task = editor.begin_submit()?;
    cancel_on_ctrl_c(&task);
    editor.finish_submit(task, &mut presenter)?;
    Ok(())
}

fn run_project(config: &ClientConfig, args: ProjectArgs) -> Result<(), Box<dyn Error>> {
    let mut form: ProjectForm = match &args.form {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => ProjectForm::default(),
    };
    if let Some(name) = args.name {
        form.name = name;
    }
    if let Some(lat) = args.lat {
        form.lat = lat;
    }
    if let Some(long) = args.long {
        form.long = long;
    }
    if let Some(start_date) = args.start_date {
        form.start_date = start_date;
    }
    if let Some(end_date) = args.end_date {
        form.end_date = end_date;
    }

    let transport: Arc<dyn Transport> = Arc::new(UreqTransport::from_config(config));
    let mut presenter = ConsolePresenter::new(&config.server.base_url, config.display.use_color);
    let submitter = ProjectSubmitter::new(config, transport);

    if args.dry_run {
        let report = submitter.validate(&form, &mut presenter);
        if report.is_valid() {
            println!("{}", serde_json::to_string_pretty(&form.to_payload())?);
        } else {
            println!("❌ {} invalid field(s)", report.invalid_fields().len());
        }
        return Ok(());
    }

    let task = submitter.begin_submit(&form, &mut presenter)?;
    cancel_on_ctrl_c(&task);
    submitter.finish_submit(task, &mut presenter)?;
    Ok(())
}

/// Ctrl+C abandons the pending request instead of killing the process
fn cancel_on_ctrl_c<T: Send + 'static>(task: &SubmissionTask<T>) {
    let handle = task.cancel_handle();
    match ctrlc::set_handler(move || {
        println!("\n🛑 Cancelling submission...");
        handle.cancel();
    }) {
        Ok(()) => info!("🔄 Waiting for server... Press Ctrl+C to cancel"),
        Err(e) => warn!("⚠️ Failed to install Ctrl+C handler: {}", e),
    }
}
