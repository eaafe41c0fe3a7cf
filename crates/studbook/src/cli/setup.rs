use chrono::NaiveDate;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use studbookapp::model::{BreedingMethod, FoalSex, Priority, RecordKind, RecordStatus};
use studbookapp::sort::SortKey;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Styled terminal output
    #[default]
    Term,
    /// The command result as JSON
    Json,
}

impl OutputMode {
    pub fn is_structured(&self) -> bool {
        matches!(self, OutputMode::Json)
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "studbook",
    bin_name = "studbook",
    version,
    disable_help_subcommand = true
)]
#[command(about = "Breeding and medical records for a horse stud", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Records file (overrides config)
    #[arg(long, global = true, value_name = "FILE", help_heading = "Options")]
    pub data: Option<PathBuf>,

    /// Config file (defaults to studbook.toml in the config directory)
    #[arg(long, global = true, value_name = "FILE", help_heading = "Options")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputMode::Term, help_heading = "Options")]
    pub output: OutputMode,

    /// Verbose logging to stderr (repeat for more)
    #[arg(short, long, global = true, action = ArgAction::Count, help_heading = "Options")]
    pub verbose: u8,

    /// Evaluate overdue and upcoming as of this date (YYYY-MM-DD)
    #[arg(long, global = true, value_name = "DATE", hide = true)]
    pub today: Option<NaiveDate>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a record
    #[command(alias = "a", display_order = 1)]
    Add(Box<AddArgs>),

    /// Change fields of a record
    #[command(display_order = 2)]
    Update(UpdateArgs),

    /// Mark a record completed today
    #[command(alias = "done", display_order = 3)]
    Complete { id: String },

    /// Delete a record
    #[command(alias = "rm", display_order = 4)]
    Delete { id: String },

    /// Show one record in full
    #[command(alias = "v", display_order = 5)]
    Show { id: String },

    /// List records
    #[command(alias = "ls", display_order = 10)]
    List {
        #[command(flatten)]
        filter: FilterArgs,

        /// Sort order (defaults to config, then store order)
        #[arg(long, value_name = "KEY")]
        sort: Option<SortKey>,
    },

    /// Open records past their due date
    #[command(display_order = 11)]
    Overdue,

    /// Records scheduled in the next few days
    #[command(display_order = 12)]
    Upcoming {
        /// Days ahead to look (defaults to config, 7)
        #[arg(long, short)]
        days: Option<u32>,
    },

    /// Counts by type, status and priority
    #[command(display_order = 13)]
    Stats {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Every record for one horse
    #[command(display_order = 14)]
    Horse { horse_id: String },
}

/// Filters shared by `list` and `stats`. Repeat a flag to allow several values.
#[derive(Args, Debug, Default, Clone)]
pub struct FilterArgs {
    /// Search title and horse name
    #[arg(short, long)]
    pub search: Option<String>,

    /// Record type (e.g. medication, heat-cycle)
    #[arg(long = "type", short = 't', value_name = "TYPE")]
    pub types: Vec<RecordKind>,

    #[arg(long = "status", value_name = "STATUS")]
    pub statuses: Vec<RecordStatus>,

    #[arg(long = "priority", short = 'p', value_name = "PRIORITY")]
    pub priorities: Vec<Priority>,

    /// Horse id
    #[arg(long, value_name = "ID")]
    pub horse: Option<String>,

    /// Veterinarian name (exact)
    #[arg(long, value_name = "NAME")]
    pub vet: Option<String>,

    /// From date, inclusive
    #[arg(long, value_name = "DATE")]
    pub from: Option<NaiveDate>,

    /// To date, inclusive
    #[arg(long, value_name = "DATE")]
    pub to: Option<NaiveDate>,

    /// Tag (any of)
    #[arg(long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Record type
    pub kind: RecordKind,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long, value_name = "ID")]
    pub horse_id: Option<String>,

    /// Defaults to the horse id
    #[arg(long, value_name = "NAME")]
    pub horse_name: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub status: Option<RecordStatus>,

    #[arg(long, short)]
    pub priority: Option<Priority>,

    #[arg(long, value_name = "DATE")]
    pub scheduled: Option<NaiveDate>,

    #[arg(long, value_name = "DATE")]
    pub due: Option<NaiveDate>,

    #[arg(long, value_name = "NAME")]
    pub vet: Option<String>,

    #[arg(long, value_name = "NAME")]
    pub assigned_to: Option<String>,

    #[arg(long, value_name = "AMOUNT")]
    pub estimated_cost: Option<f64>,

    #[arg(long, value_name = "AMOUNT")]
    pub actual_cost: Option<f64>,

    #[arg(long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,

    #[arg(long)]
    pub notes: Option<String>,

    #[command(flatten)]
    pub details: DetailArgs,
}

/// Type-specific fields. Flags that do not apply to the chosen type are ignored.
#[derive(Args, Debug, Default)]
#[command(next_help_heading = "Type fields")]
pub struct DetailArgs {
    // medication
    #[arg(long, value_name = "NAME")]
    pub medication: Option<String>,
    #[arg(long)]
    pub dosage: Option<String>,
    #[arg(long)]
    pub frequency: Option<String>,
    #[arg(long)]
    pub route: Option<String>,
    #[arg(long, value_name = "DAYS")]
    pub duration_days: Option<u32>,

    // appointment
    #[arg(long, value_name = "TYPE")]
    pub appointment_type: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long, value_name = "MINUTES")]
    pub duration_minutes: Option<u32>,

    // veterinary checkup
    #[arg(long, value_name = "TYPE")]
    pub checkup_type: Option<String>,
    #[arg(long, value_name = "CELSIUS")]
    pub temperature: Option<f64>,
    #[arg(long, value_name = "BPM")]
    pub heart_rate: Option<u32>,

    // ultrasound
    #[arg(long, value_name = "DAYS")]
    pub days_post_breeding: Option<u32>,
    #[arg(long, value_name = "MM")]
    pub left_follicle: Option<f64>,
    #[arg(long, value_name = "MM")]
    pub right_follicle: Option<f64>,
    #[arg(long, value_name = "BOOL")]
    pub pregnant: Option<bool>,
    #[arg(long, value_name = "BOOL")]
    pub heartbeat: Option<bool>,

    // checkup, ultrasound, health assessment
    #[arg(long)]
    pub findings: Option<String>,

    // breeding and pregnancy
    #[arg(long, value_name = "NAME")]
    pub stallion: Option<String>,
    #[arg(long, value_name = "ID")]
    pub stallion_id: Option<String>,
    #[arg(long, value_enum)]
    pub method: Option<MethodArg>,
    #[arg(long, value_name = "DATE")]
    pub breeding_date: Option<NaiveDate>,
    #[arg(long, value_name = "DATE")]
    pub expected_foaling: Option<NaiveDate>,
    #[arg(long)]
    pub stage: Option<String>,

    // foaling
    #[arg(long, value_name = "DATE")]
    pub foaling_date: Option<NaiveDate>,
    #[arg(long, value_enum)]
    pub foal_sex: Option<FoalSexArg>,
    #[arg(long, value_name = "NAME")]
    pub foal_name: Option<String>,
    #[arg(long)]
    pub complications: Option<String>,

    // health assessment
    #[arg(long, value_name = "1-9")]
    pub bcs: Option<u8>,
    #[arg(long, value_name = "KG")]
    pub weight: Option<f64>,

    // heat cycle
    #[arg(long, value_name = "DATE")]
    pub cycle_start: Option<NaiveDate>,
    #[arg(long)]
    pub intensity: Option<String>,
    #[arg(long, value_name = "BOOL")]
    pub ovulation: Option<bool>,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    pub id: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub status: Option<RecordStatus>,

    #[arg(long, short)]
    pub priority: Option<Priority>,

    #[arg(long, value_name = "DATE", conflicts_with = "clear_scheduled")]
    pub scheduled: Option<NaiveDate>,

    #[arg(long)]
    pub clear_scheduled: bool,

    #[arg(long, value_name = "DATE", conflicts_with = "clear_due")]
    pub due: Option<NaiveDate>,

    #[arg(long)]
    pub clear_due: bool,

    #[arg(long, value_name = "NAME")]
    pub vet: Option<String>,

    /// Replaces all tags
    #[arg(long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,

    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum MethodArg {
    NaturalCover,
    FreshAi,
    CooledAi,
    FrozenAi,
    EmbryoTransfer,
}

impl From<MethodArg> for BreedingMethod {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::NaturalCover => BreedingMethod::NaturalCover,
            MethodArg::FreshAi => BreedingMethod::FreshAi,
            MethodArg::CooledAi => BreedingMethod::CooledAi,
            MethodArg::FrozenAi => BreedingMethod::FrozenAi,
            MethodArg::EmbryoTransfer => BreedingMethod::EmbryoTransfer,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum FoalSexArg {
    Colt,
    Filly,
}

impl From<FoalSexArg> for FoalSex {
    fn from(arg: FoalSexArg) -> Self {
        match arg {
            FoalSexArg::Colt => FoalSex::Colt,
            FoalSexArg::Filly => FoalSex::Filly,
        }
    }
}

pub fn parse_cli() -> Cli {
    Cli::parse()
}
