use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

use roadmap_board::config::BoardConfig;
use roadmap_board::io::{export_csv, import_csv, write_projects};
use roadmap_board::model::{Board, Project, ProjectId};
use roadmap_board::sequencing::{RecordedResponse, SequencingClient, SequencingRequest};
use roadmap_board::timeline::{DragGesture, YearViewport};
use roadmap_board::view::{
    default_load_year, monthly_load, FilterOptions, ProjectFilter, SortConfig, SortDirection,
    SortKey, TeamPalette,
};

fn csv_arg() -> Arg {
    Arg::new("csv")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Projects CSV file")
}

fn year_arg() -> Arg {
    Arg::new("year")
        .long("year")
        .value_parser(value_parser!(i32))
        .help("Display year (defaults to the configured or current year)")
}

fn output_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_parser(value_parser!(PathBuf))
        .help("Write the resulting CSV here instead of stdout")
}

fn multi(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .action(ArgAction::Append)
        .help(help)
}

fn cli() -> Command {
    Command::new("roadmap")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Project roadmap planning board")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("layout")
                .about("Pack projects into timeline rows for a year")
                .arg(csv_arg())
                .arg(year_arg()),
        )
        .subcommand(
            Command::new("reschedule")
                .about("Move a project by a drag gesture and write the updated board")
                .arg(csv_arg())
                .arg(Arg::new("id").long("id").help("Project id"))
                .arg(Arg::new("name").long("name").conflicts_with("id").help("Project name"))
                .arg(
                    Arg::new("grab-x")
                        .long("grab-x")
                        .default_value("0")
                        .value_parser(value_parser!(f64))
                        .help("Pointer offset from the bar's left edge at drag start (px)"),
                )
                .arg(
                    Arg::new("drop-x")
                        .long("drop-x")
                        .required(true)
                        .allow_negative_numbers(true)
                        .value_parser(value_parser!(f64))
                        .help("Drop position from the timeline's left edge (px)"),
                )
                .arg(
                    Arg::new("width")
                        .long("width")
                        .value_parser(value_parser!(f64))
                        .help("Timeline width in pixels"),
                )
                .arg(year_arg())
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("list")
                .about("Filter and sort projects")
                .arg(csv_arg())
                .arg(multi("team", "Keep projects of this team"))
                .arg(multi("function", "Keep projects with this function"))
                .arg(multi("assignee", "Keep projects with this assignee"))
                .arg(multi("support", "Keep projects with this support"))
                .arg(multi("dependency", "Keep projects depending on this project"))
                .arg(
                    Arg::new("sort")
                        .long("sort")
                        .value_parser([
                            "name", "epic", "team", "function", "assignee", "support",
                            "dependencies", "start", "end", "progress", "rag",
                        ])
                        .help("Column to sort by"),
                )
                .arg(
                    Arg::new("desc")
                        .long("desc")
                        .action(ArgAction::SetTrue)
                        .help("Sort descending"),
                )
                .arg(
                    Arg::new("options")
                        .long("options")
                        .action(ArgAction::SetTrue)
                        .help("Print the available filter values instead"),
                ),
        )
        .subcommand(
            Command::new("load")
                .about("Monthly project count per assignee")
                .arg(csv_arg())
                .arg(year_arg())
                .arg(multi("assignee", "Only report this assignee")),
        )
        .subcommand(
            Command::new("prompt")
                .about("Render the sequencing request for the board")
                .arg(csv_arg())
                .arg(Arg::new("availability").long("availability").help("Team availability note"))
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print the JSON request instead of the prompt"),
                ),
        )
        .subcommand(
            Command::new("apply-sequence")
                .about("Reorder the board with a sequencing response")
                .arg(csv_arg())
                .arg(
                    Arg::new("response")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("File holding the service's JSON response"),
                )
                .arg(Arg::new("availability").long("availability").help("Team availability note"))
                .arg(multi("team", "Only sequence projects of this team"))
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("sample")
                .about("Write the demo roadmap as CSV")
                .arg(output_arg()),
        )
}

fn load_board(args: &ArgMatches) -> Result<Board> {
    let path = args
        .get_one::<PathBuf>("csv")
        .ok_or_else(|| anyhow!("missing CSV path"))?;
    let projects = import_csv(path).with_context(|| format!("Import failed for {}", path.display()))?;
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Imported Roadmap")
        .to_string();
    Ok(Board::with_projects(name, projects))
}

fn display_year(args: &ArgMatches, config: &BoardConfig) -> i32 {
    args.get_one::<i32>("year").copied().unwrap_or_else(|| config.year())
}

fn write_output(projects: &[Project], output: Option<&PathBuf>) -> Result<()> {
    match output {
        Some(path) => {
            let count = export_csv(projects, path)
                .with_context(|| format!("CSV export failed for {}", path.display()))?;
            println!("Exported {} projects to {}", count, path.display());
        }
        None => {
            write_projects(projects, std::io::stdout().lock()).context("CSV export failed")?;
        }
    }
    Ok(())
}

fn values(args: &ArgMatches, name: &str) -> Vec<String> {
    args.get_many::<String>(name)
        .map(|v| v.cloned().collect())
        .unwrap_or_default()
}

fn run_layout(args: &ArgMatches, config: &BoardConfig) -> Result<()> {
    let board = load_board(args)?;
    let year = display_year(args, config);
    let viewport = config.viewport(year)?;
    let layout = board.layout(year);
    let palette = TeamPalette::new(board.projects());

    println!("{}: {} projects in {} rows for {}", board.name, layout.len(), layout.row_count(), year);
    for (row, members) in layout.rows().iter().enumerate() {
        println!("Row {}:", row);
        for id in members {
            let Some(project) = board.get(*id) else { continue };
            let bar = viewport.bar(project).ok().flatten();
            match bar {
                Some(bar) => println!(
                    "  {:<32} {} .. {}  [{:5.1}% +{:5.1}%]  {}",
                    project.name,
                    project.start_date,
                    project.end_date,
                    bar.left * 100.0,
                    bar.width * 100.0,
                    palette.color_of(&project.team)
                ),
                None => println!(
                    "  {:<32} {} .. {}  {}",
                    project.name,
                    project.start_date,
                    project.end_date,
                    palette.color_of(&project.team)
                ),
            }
        }
    }
    Ok(())
}

fn find_target(board: &Board, args: &ArgMatches) -> Result<ProjectId> {
    if let Some(id) = args.get_one::<String>("id") {
        let id: ProjectId = id.parse().with_context(|| format!("Invalid project id '{}'", id))?;
        if board.get(id).is_none() {
            bail!("No project with id {}", id);
        }
        return Ok(id);
    }
    if let Some(name) = args.get_one::<String>("name") {
        return board
            .find_by_name(name)
            .map(|p| p.id)
            .ok_or_else(|| anyhow!("No project named '{}'", name));
    }
    bail!("Pass --id or --name to choose the project to move")
}

fn run_reschedule(args: &ArgMatches, config: &BoardConfig) -> Result<()> {
    let mut board = load_board(args)?;
    let year = display_year(args, config);
    let width = args
        .get_one::<f64>("width")
        .copied()
        .unwrap_or(config.timeline_width_px);
    let viewport = YearViewport::new(year, width)?;
    let id = find_target(&board, args)?;

    let gesture = DragGesture::new(
        args.get_one::<f64>("grab-x").copied().unwrap_or(0.0),
        args.get_one::<f64>("drop-x").copied().unwrap_or(0.0),
    );

    if board.reschedule(id, &gesture, &viewport) {
        if let Some(project) = board.get(id) {
            eprintln!(
                "Rescheduled '{}' to {} .. {}",
                project.name, project.start_date, project.end_date
            );
        }
    } else {
        eprintln!("Project dates unchanged");
    }
    write_output(board.projects(), args.get_one::<PathBuf>("output"))
}

fn parse_sort_key(key: &str) -> Option<SortKey> {
    Some(match key {
        "name" => SortKey::Name,
        "epic" => SortKey::EpicNumber,
        "team" => SortKey::Team,
        "function" => SortKey::Function,
        "assignee" => SortKey::Assignee,
        "support" => SortKey::Support,
        "dependencies" => SortKey::Dependencies,
        "start" => SortKey::StartDate,
        "end" => SortKey::EndDate,
        "progress" => SortKey::Progress,
        "rag" => SortKey::RagStatus,
        _ => return None,
    })
}

fn filter_from(args: &ArgMatches) -> ProjectFilter {
    ProjectFilter {
        teams: values(args, "team").into_iter().collect(),
        functions: values(args, "function").into_iter().collect(),
        assignees: values(args, "assignee").into_iter().collect(),
        support: values(args, "support").into_iter().collect(),
        dependencies: values(args, "dependency").into_iter().collect(),
    }
}

fn run_list(args: &ArgMatches) -> Result<()> {
    let board = load_board(args)?;

    if args.get_flag("options") {
        let options = FilterOptions::collect(board.projects());
        println!("Teams:        {}", options.teams.join(" | "));
        println!("Functions:    {}", options.functions.join(" | "));
        println!("Assignees:    {}", options.assignees.join(" | "));
        println!("Support:      {}", options.support.join(" | "));
        println!("Dependencies: {}", options.dependencies.join(" | "));
        return Ok(());
    }

    let filter = filter_from(args);
    let filtered = filter.apply(board.projects());
    let sort = SortConfig {
        key: args.get_one::<String>("sort").and_then(|k| parse_sort_key(k)),
        direction: if args.get_flag("desc") {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        },
    };

    for project in sort.apply(&filtered) {
        println!(
            "{}  {:<32} {:<10} {:<14} {} .. {}  {:>3}%  {}",
            project.id,
            project.name,
            project.epic_number,
            project.team,
            project.start_date,
            project.end_date,
            project.progress.unwrap_or(0),
            project.rag_status.as_str()
        );
    }
    if filter.is_active() {
        println!("Showing {} of {} projects.", filtered.len(), board.len());
    }
    Ok(())
}

fn run_load(args: &ArgMatches, config: &BoardConfig) -> Result<()> {
    let board = load_board(args)?;
    let year = args
        .get_one::<i32>("year")
        .copied()
        .or_else(|| default_load_year(board.projects()))
        .unwrap_or_else(|| config.year());
    let load = monthly_load(board.projects(), year, &values(args, "assignee"));

    let Some(first) = load.first() else {
        return Ok(());
    };
    if first.counts.is_empty() {
        println!("No project data to display. Try adjusting filters or adding projects.");
        return Ok(());
    }

    print!("{:<24}", year);
    for month in &load {
        print!("{:>5}", month.label);
    }
    println!();
    for assignee in first.counts.keys() {
        print!("{:<24}", assignee);
        for month in &load {
            print!("{:>5}", month.counts.get(assignee).copied().unwrap_or(0));
        }
        println!();
    }
    Ok(())
}

fn availability<'a>(args: &'a ArgMatches, config: &'a BoardConfig) -> &'a str {
    args.get_one::<String>("availability")
        .map(String::as_str)
        .unwrap_or(config.team_availability.as_str())
}

fn run_prompt(args: &ArgMatches, config: &BoardConfig) -> Result<()> {
    let board = load_board(args)?;
    let request = SequencingRequest::new(board.projects(), availability(args, config));
    if args.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&request)?);
    } else {
        print!("{}", request.prompt());
    }
    Ok(())
}

fn run_apply_sequence(args: &ArgMatches, config: &BoardConfig) -> Result<()> {
    let mut board = load_board(args)?;
    let response_path = args
        .get_one::<PathBuf>("response")
        .ok_or_else(|| anyhow!("missing response path"))?;
    let raw = read_to_string(response_path)?;

    let filter = ProjectFilter {
        teams: values(args, "team").into_iter().collect(),
        ..Default::default()
    };
    let candidates = filter.apply(board.projects());

    let client = SequencingClient::new(RecordedResponse::new(raw));
    let response = client
        .optimize(&mut board, &candidates, availability(args, config))
        .context("AI sequencing failed; the board was left unchanged")?;

    eprintln!("Reasoning:\n{}", response.reasoning);
    write_output(board.projects(), args.get_one::<PathBuf>("output"))
}

fn read_to_string(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn main() -> Result<()> {
    let config = BoardConfig::load().context("Failed to load configuration")?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.log_level.as_str()))
        .init();

    let matches = cli().get_matches();
    match matches.subcommand() {
        Some(("layout", args)) => run_layout(args, &config),
        Some(("reschedule", args)) => run_reschedule(args, &config),
        Some(("list", args)) => run_list(args),
        Some(("load", args)) => run_load(args, &config),
        Some(("prompt", args)) => run_prompt(args, &config),
        Some(("apply-sequence", args)) => run_apply_sequence(args, &config),
        Some(("sample", args)) => {
            let board = Board::sample();
            write_output(board.projects(), args.get_one::<PathBuf>("output"))
        }
        _ => unreachable!("subcommand_required is set"),
    }
}
