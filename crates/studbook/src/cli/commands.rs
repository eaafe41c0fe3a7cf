//! # CLI Layer
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: convert shell arguments into typed commands via clap
//! 2. **Context Setup**: logging, configuration, and the file-backed API
//! 3. **Dispatch**: turn arguments into drafts, patches and queries for the API
//! 4. **Output Formatting**: hand the `CmdResult` to `render`
//!
//! Errors bubble up to `main`, which prints them and exits with status 1.

use super::render::{render, RenderContext, View};
use super::setup::{parse_cli, AddArgs, Cli, Commands, DetailArgs, FilterArgs, OutputMode, UpdateArgs};
use log::{debug, warn};
use studbookapp::api::StudbookApi;
use studbookapp::commands::ListQuery;
use studbookapp::config::StudbookConfig;
use studbookapp::error::Result;
use studbookapp::filter::{DateRange, RecordFilter};
use studbookapp::forms::{
    AppointmentDraft, BreedingDraft, DetailsDraft, FoalingDraft, HeatCycleDraft, MedicationDraft,
    PregnancyDraft, RecordDraft,
};
use studbookapp::logging::{init_logging, level_for_verbosity};
use studbookapp::model::{
    CheckupDetails, HealthAssessmentDetails, RecordKind, RecordPatch, UltrasoundDetails,
};
use studbookapp::sort::SortKey;
use studbookapp::store::fs_backend::FsBackend;

struct AppContext {
    api: StudbookApi<FsBackend>,
    output: OutputMode,
    default_sort: Option<SortKey>,
}

pub fn run() -> Result<()> {
    let cli = parse_cli();

    if let Err(err) = init_logging(level_for_verbosity(cli.verbose)) {
        eprintln!("Warning: {}", err);
    }

    let mut ctx = init_context(&cli)?;
    let command = cli.command.unwrap_or(Commands::List {
        filter: FilterArgs::default(),
        sort: None,
    });
    let output = dispatch(&mut ctx, command)?;
    print!("{}", output);
    Ok(())
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let config = StudbookConfig::load(cli.config.as_deref())?;
    let data_file = match &cli.data {
        Some(path) => path.clone(),
        None => config.data_file()?,
    };
    debug!("cli: using data file {}", data_file.display());

    let mut api = StudbookApi::open(FsBackend::new(data_file))?.with_window_days(config.upcoming_days);
    if let Some(today) = cli.today {
        api = api.with_today(today);
    }

    Ok(AppContext {
        api,
        output: cli.output,
        default_sort: config.default_sort,
    })
}

fn dispatch(ctx: &mut AppContext, command: Commands) -> Result<String> {
    let api = &mut ctx.api;
    let (result, view) = match command {
        Commands::Add(args) => (api.create_record(&build_draft(*args))?, View::Modification),
        Commands::Update(args) => {
            let id = args.id.clone();
            (api.update_record(&id, build_patch(args))?, View::Modification)
        }
        Commands::Complete { id } => (api.complete_record(&id)?, View::Modification),
        Commands::Delete { id } => (api.delete_record(&id)?, View::Modification),
        Commands::Show { id } => (api.show_record(&id)?, View::Detail),
        Commands::List { filter, sort } => {
            let mut query = ListQuery::new(build_filter(filter));
            query.sort = sort.or(ctx.default_sort);
            (api.list_records(&query)?, View::Listing)
        }
        Commands::Overdue => (api.overdue_records()?, View::Listing),
        Commands::Upcoming { days } => (api.upcoming_records(days)?, View::Listing),
        Commands::Stats { filter } => (api.stats(build_filter(filter))?, View::Stats),
        Commands::Horse { horse_id } => (api.horse_records(&horse_id)?, View::Listing),
    };

    let render_ctx = RenderContext {
        output: ctx.output,
        today: ctx.api.board().today(),
        window_days: ctx.api.board().window_days(),
    };
    render(&result, view, &render_ctx)
}

fn build_filter(args: FilterArgs) -> RecordFilter {
    let date_range = match (args.from, args.to) {
        (None, None) => None,
        (from, to) => Some(DateRange::new(from, to)),
    };
    RecordFilter {
        search: args.search,
        types: args.types,
        statuses: args.statuses,
        priorities: args.priorities,
        horse_id: args.horse,
        veterinarian: args.vet,
        date_range,
        tags: args.tags,
    }
}

fn build_draft(args: AddArgs) -> RecordDraft {
    let mut draft = RecordDraft::new(args.kind);
    draft.title = args.title;
    draft.description = args.description;
    draft.status = args.status;
    draft.priority = args.priority;
    draft.horse_id = args.horse_id;
    draft.horse_name = args.horse_name;
    draft.scheduled_date = args.scheduled;
    draft.due_date = args.due;
    draft.veterinarian = args.vet;
    draft.assigned_to = args.assigned_to;
    draft.estimated_cost = args.estimated_cost;
    draft.actual_cost = args.actual_cost;
    draft.tags = args.tags;
    draft.notes = args.notes;
    draft.details = build_details(args.kind, args.details);
    draft
}

fn build_details(kind: RecordKind, d: DetailArgs) -> DetailsDraft {
    match kind {
        RecordKind::Medication => DetailsDraft::Medication(MedicationDraft {
            medication_name: d.medication,
            dosage: d.dosage,
            frequency: d.frequency,
            route: d.route,
            duration_days: d.duration_days,
        }),
        RecordKind::Appointment => DetailsDraft::Appointment(AppointmentDraft {
            appointment_type: d.appointment_type,
            location: d.location,
            duration_minutes: d.duration_minutes,
        }),
        RecordKind::VeterinaryCheckup => DetailsDraft::VeterinaryCheckup(CheckupDetails {
            checkup_type: d.checkup_type,
            findings: d.findings,
            temperature_c: d.temperature,
            heart_rate_bpm: d.heart_rate,
        }),
        RecordKind::Ultrasound => DetailsDraft::Ultrasound(UltrasoundDetails {
            days_post_breeding: d.days_post_breeding,
            left_follicle_mm: d.left_follicle,
            right_follicle_mm: d.right_follicle,
            pregnancy_detected: d.pregnant,
            heartbeat_detected: d.heartbeat,
            findings: d.findings,
        }),
        RecordKind::Breeding => DetailsDraft::Breeding(BreedingDraft {
            stallion_id: d.stallion_id,
            stallion_name: d.stallion,
            method: d.method.map(Into::into),
            breeding_date: d.breeding_date,
        }),
        RecordKind::Pregnancy => DetailsDraft::Pregnancy(PregnancyDraft {
            breeding_date: d.breeding_date,
            expected_foaling_date: d.expected_foaling,
            stallion_name: d.stallion,
            stage: d.stage,
        }),
        RecordKind::Foaling => DetailsDraft::Foaling(FoalingDraft {
            foaling_date: d.foaling_date,
            foal_sex: d.foal_sex.map(Into::into),
            foal_name: d.foal_name,
            complications: d.complications,
        }),
        RecordKind::HealthAssessment => DetailsDraft::HealthAssessment(HealthAssessmentDetails {
            body_condition_score: d.bcs,
            weight_kg: d.weight,
            findings: d.findings,
        }),
        RecordKind::HeatCycle => DetailsDraft::HeatCycle(HeatCycleDraft {
            cycle_start: d.cycle_start,
            intensity: d.intensity,
            ovulation_detected: d.ovulation,
        }),
    }
}

fn build_patch(args: UpdateArgs) -> RecordPatch {
    let mut patch = RecordPatch::new();
    if let Some(title) = args.title {
        patch = patch.with_title(title);
    }
    if let Some(status) = args.status {
        patch = patch.with_status(status);
    }
    if let Some(priority) = args.priority {
        patch = patch.with_priority(priority);
    }
    if args.clear_scheduled {
        patch = patch.with_scheduled_date(None);
    } else if let Some(date) = args.scheduled {
        patch = patch.with_scheduled_date(Some(date));
    }
    if args.clear_due {
        patch = patch.with_due_date(None);
    } else if let Some(date) = args.due {
        patch = patch.with_due_date(Some(date));
    }
    if let Some(vet) = args.vet {
        patch = patch.with_veterinarian(Some(vet).filter(|v| !v.trim().is_empty()));
    }
    if !args.tags.is_empty() {
        patch = patch.with_tags(args.tags);
    }
    if let Some(notes) = args.notes {
        patch = patch.with_notes(Some(notes));
    }
    if patch.is_empty() {
        warn!("update: no fields given");
    }
    patch
}
