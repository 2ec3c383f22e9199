#![forbid(unsafe_code)]
use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use clap::{Parser, Subcommand};
use nobet::{
    calendar::{self, format_date},
    compute_shift, detect_coverage_gaps, io,
    leave::{self, expand_weekly_pattern},
    staff_on_shift,
    storage::{JsonStorage, Storage},
    working_window, CoverageOptions, Roster, ScheduleGrid, StaffId, StaffMember,
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de planification des gardes (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON de roster
    #[arg(long, global = true, default_value = "roster.json")]
    roster: String,

    /// Instant courant `YYYY-MM-DDTHH:MM` (par défaut : horloge locale)
    #[arg(long, global = true)]
    now: Option<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Importer le personnel depuis un CSV
    ImportStaff {
        #[arg(long)]
        csv: String,
    },

    /// Garde d'un membre des urgences
    Shift {
        #[arg(long)]
        id: i64,
        /// YYYY-MM-DD (par défaut : aujourd'hui)
        #[arg(long)]
        date: Option<String>,
    },

    /// Personnel de garde pour une date et une heure de début
    OnShift {
        #[arg(long)]
        date: String,
        /// 00:00, 08:00 ou 16:00
        #[arg(long)]
        start: String,
    },

    /// Grille des gardes, optionnellement exportée en CSV
    Grid {
        #[arg(long)]
        from: String,
        #[arg(long, default_value_t = 7)]
        days: u32,
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Horaires d'un membre de consultation
    Window {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        date: String,
    },

    /// Ajouter/retirer un jour de congé
    ToggleLeave {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        date: String,
    },

    /// Générer des congés datés à partir de jours de semaine
    ExpandLeave {
        #[arg(long)]
        id: i64,
        /// liste "1,4" (0 = dimanche .. 6 = samedi)
        #[arg(long)]
        weekdays: String,
        #[arg(long, default_value_t = 4)]
        weeks: u32,
        #[arg(long)]
        from: Option<String>,
    },

    /// Vérifier la couverture des gardes
    Coverage {
        #[arg(long)]
        from: String,
        #[arg(long, default_value_t = 7)]
        days: u32,
        #[arg(long, default_value_t = 1)]
        min_staff: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let now = match cli.now.as_deref() {
        Some(raw) => NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
            .with_context(|| format!("invalid --now value: {raw}"))?,
        None => Local::now().naive_local(),
    };
    let today = now.date();

    let storage = JsonStorage::open(&cli.roster);
    let mut roster = storage.load()?;

    let code = match cli.cmd {
        Commands::ImportStaff { csv } => {
            let staff = io::import_staff_csv(csv)?;
            for member in staff {
                match roster.find_mut_by_id(member.id) {
                    Some(existing) => *existing = member,
                    None => roster.staff.push(member),
                }
            }
            storage.save(&roster)?;
            0
        }
        Commands::Shift { id, date } => {
            let date = match date {
                Some(raw) => parse_date_arg(&raw)?,
                None => today,
            };
            let member = find(&roster, id)?;
            let emergency = roster.emergency();
            match compute_shift(member, &emergency, date, now) {
                Some(a) => {
                    println!(
                        "{} | {} | shift {} {}-{} | {}",
                        member.display_name(),
                        format_date(date),
                        a.shift_number,
                        a.shift_start.format("%H:%M"),
                        a.shift_end.format("%H:%M"),
                        if !a.is_working_today {
                            "on leave"
                        } else if a.is_currently_working {
                            "working now"
                        } else {
                            "scheduled"
                        }
                    );
                    if !a.weekly_leave_weekdays.is_empty() {
                        let days: Vec<String> =
                            a.weekly_leave_weekdays.iter().map(Weekday::to_string).collect();
                        println!("weekly leave: {}", days.join(", "));
                    }
                    println!(
                        "next: {} {}",
                        format_date(a.next_shift.date),
                        a.next_shift.start.format("%H:%M")
                    );
                    0
                }
                None => {
                    eprintln!("no schedule available for staff {id}");
                    2
                }
            }
        }
        Commands::OnShift { date, start } => {
            let date = parse_date_arg(&date)?;
            let start = NaiveTime::parse_from_str(&start, "%H:%M")
                .with_context(|| format!("invalid shift start: {start}"))?;
            for name in staff_on_shift(date, start, &roster.emergency()) {
                println!("{name}");
            }
            0
        }
        Commands::Grid { from, days, out_csv } => {
            let from = parse_date_arg(&from)?;
            let grid = ScheduleGrid::build(&roster.emergency(), from, days)?;
            if let Some(path) = out_csv {
                io::export_grid_csv(path, &grid)?;
            }
            print!("{}", io::grid_to_csv_string(&grid)?);
            0
        }
        Commands::Window { id, date } => {
            let date = parse_date_arg(&date)?;
            let member = find(&roster, id)?;
            match working_window(member, date) {
                Some(w) => println!(
                    "{} | {} | {}-{}",
                    member.display_name(),
                    format_date(date),
                    w.start.format("%H:%M"),
                    w.end.format("%H:%M")
                ),
                None => println!("{} | {} | not working", member.display_name(), format_date(date)),
            }
            0
        }
        Commands::ToggleLeave { id, date } => {
            let date = parse_date_arg(&date)?;
            let member = find_mut(&mut roster, id)?;
            match leave::toggle_leave_date(&member.leave_markers, date, today) {
                Ok(updated) => {
                    member.leave_markers = updated;
                    storage.save(&roster)?;
                    0
                }
                Err(err) => {
                    // validation refusée : pas de sauvegarde
                    eprintln!("rejected: {err}");
                    2
                }
            }
        }
        Commands::ExpandLeave { id, weekdays, weeks, from } => {
            let from = match from {
                Some(raw) => parse_date_arg(&raw)?,
                None => today,
            };
            let weekdays = parse_weekdays(&weekdays)?;
            let member = find_mut(&mut roster, id)?;
            let mut added = 0usize;
            for date in expand_weekly_pattern(&weekdays, from, weeks) {
                if leave::apply_approved_leave(&mut member.leave_markers, date) {
                    added += 1;
                }
            }
            storage.save(&roster)?;
            println!("{added} leave date(s) added");
            0
        }
        Commands::Coverage { from, days, min_staff } => {
            let from = parse_date_arg(&from)?;
            let opts = CoverageOptions { min_staff_per_shift: min_staff };
            let gaps = detect_coverage_gaps(&roster.emergency(), from, days, opts);
            if gaps.is_empty() {
                println!("OK: every shift covered");
                0
            } else {
                eprintln!("Found {} understaffed shift(s)", gaps.len());
                for gap in &gaps {
                    println!(
                        "{} {} {}/{}",
                        format_date(gap.date),
                        gap.slot.label(),
                        gap.staffed,
                        gap.required
                    );
                }
                // Code 2 = WARNING/INCOMPLETE
                2
            }
        }
    };

    std::process::exit(code);
}

fn parse_date_arg(raw: &str) -> Result<NaiveDate> {
    calendar::parse_date(raw).with_context(|| format!("invalid date (expected YYYY-MM-DD): {raw}"))
}

fn parse_weekdays(raw: &str) -> Result<Vec<Weekday>> {
    let mut out = Vec::new();
    for chunk in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let idx: u8 = chunk.parse().with_context(|| format!("invalid weekday: {chunk}"))?;
        match calendar::weekday_from_sunday_index(idx) {
            Some(w) => out.push(w),
            None => bail!("weekday out of range (0..6): {idx}"),
        }
    }
    if out.is_empty() {
        bail!("at least one weekday is required");
    }
    Ok(out)
}

fn find(roster: &Roster, id: i64) -> Result<&StaffMember> {
    roster
        .find_by_id(StaffId::new(id))
        .with_context(|| format!("unknown staff id: {id}"))
}

fn find_mut(roster: &mut Roster, id: i64) -> Result<&mut StaffMember> {
    roster
        .find_mut_by_id(StaffId::new(id))
        .with_context(|| format!("unknown staff id: {id}"))
}
