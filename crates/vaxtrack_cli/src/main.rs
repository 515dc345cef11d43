//! Command-line driver for the vaxtrack core.
//!
//! # Responsibility
//! - Map a handful of subcommands onto `VaccineService` use-cases.
//! - Read the clock once per invocation and pass it down explicitly.

mod config;

use chrono::{DateTime, Locale, NaiveDate, Utc};
use config::CliConfig;
use log::info;
use std::io::Write;
use std::process::ExitCode;
use uuid::Uuid;
use vaxtrack_core::db::open_db;
use vaxtrack_core::{
    RenewalInterval, SqliteKeyValueStore, SqliteReminderScheduler, Vaccine, VaccineDraft,
    VaccineFilter, VaccineService,
};

const USAGE: &str = "usage:
  vaxtrack list [--filter all|overdue|expiring|no-renewal]
  vaxtrack add <name> <YYYY-MM-DD> [--renew <years> <months>]
  vaxtrack edit <id> <name> <YYYY-MM-DD> [--renew <years> <months>]
  vaxtrack delete <id>
  vaxtrack show <id>
  vaxtrack reminders [--due <YYYY-MM-DD>]
  vaxtrack version";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    List {
        filter: VaccineFilter,
    },
    Add {
        name: String,
        date: NaiveDate,
        renewal: Option<RenewalInterval>,
    },
    Edit {
        id: Uuid,
        name: String,
        date: NaiveDate,
        renewal: Option<RenewalInterval>,
    },
    Delete {
        id: Uuid,
    },
    Show {
        id: Uuid,
    },
    Reminders {
        due: Option<NaiveDate>,
    },
    Version,
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = match parse_args(&args) {
        Ok(command) => command,
        Err(message) => {
            eprintln!("{message}\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    let result = CliConfig::from_env().and_then(|config| {
        if let Some(log_dir) = config.log_dir.as_deref() {
            vaxtrack_core::init_logging(&config.log_level, log_dir)?;
        }
        run(command, &config, Utc::now(), &mut std::io::stdout().lock())
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let Some((name, rest)) = args.split_first() else {
        return Ok(Command::List {
            filter: VaccineFilter::All,
        });
    };

    match name.as_str() {
        "list" => match rest {
            [] => Ok(Command::List {
                filter: VaccineFilter::All,
            }),
            [flag, value] if flag == "--filter" => Ok(Command::List {
                filter: value
                    .parse::<VaccineFilter>()
                    .map_err(|err| err.to_string())?,
            }),
            _ => Err("list takes at most `--filter <mode>`".to_string()),
        },
        "add" => match rest {
            [name, date, tail @ ..] => Ok(Command::Add {
                name: name.clone(),
                date: parse_day(date)?,
                renewal: parse_renewal(tail)?,
            }),
            _ => Err("add needs <name> <YYYY-MM-DD>".to_string()),
        },
        "edit" => match rest {
            [id, name, date, tail @ ..] => Ok(Command::Edit {
                id: parse_id(id)?,
                name: name.clone(),
                date: parse_day(date)?,
                renewal: parse_renewal(tail)?,
            }),
            _ => Err("edit needs <id> <name> <YYYY-MM-DD>".to_string()),
        },
        "delete" => match rest {
            [id] => Ok(Command::Delete { id: parse_id(id)? }),
            _ => Err("delete needs <id>".to_string()),
        },
        "show" => match rest {
            [id] => Ok(Command::Show { id: parse_id(id)? }),
            _ => Err("show needs <id>".to_string()),
        },
        "reminders" => match rest {
            [] => Ok(Command::Reminders { due: None }),
            [flag, day] if flag == "--due" => Ok(Command::Reminders {
                due: Some(parse_day(day)?),
            }),
            _ => Err("reminders takes at most `--due <YYYY-MM-DD>`".to_string()),
        },
        "version" => Ok(Command::Version),
        other => Err(format!("unknown command `{other}`")),
    }
}

fn parse_day(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| format!("invalid date `{value}`; expected YYYY-MM-DD"))
}

fn parse_id(value: &str) -> Result<Uuid, String> {
    Uuid::parse_str(value.trim()).map_err(|_| format!("invalid vaccine id `{value}`"))
}

fn parse_renewal(tail: &[String]) -> Result<Option<RenewalInterval>, String> {
    match tail {
        [] => Ok(None),
        [flag, years, months] if flag == "--renew" => {
            let years = years
                .parse()
                .map_err(|_| format!("invalid renewal years `{years}`"))?;
            let months = months
                .parse()
                .map_err(|_| format!("invalid renewal months `{months}`"))?;
            Ok(Some(RenewalInterval::new(years, months)))
        }
        _ => Err("expected `--renew <years> <months>`".to_string()),
    }
}

fn day_start(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(chrono::NaiveTime::MIN).and_utc()
}

fn run(
    command: Command,
    config: &CliConfig,
    now: DateTime<Utc>,
    out: &mut impl Write,
) -> Result<(), String> {
    if command == Command::Version {
        let logging = match vaxtrack_core::logging_status() {
            Some(status) => format!("{} dir={}", status.level, status.log_dir.display()),
            None => "off".to_string(),
        };
        return writeln!(
            out,
            "vaxtrack_core version={}\nlogging={logging}",
            vaxtrack_core::core_version()
        )
        .map_err(|err| err.to_string());
    }

    let conn = open_db(&config.db_path).map_err(|err| err.to_string())?;
    let scheduler = SqliteReminderScheduler::new(&conn);
    let service = VaccineService::new(SqliteKeyValueStore::new(&conn), &scheduler);
    info!(
        "event=cli_command module=cli status=start db_path={}",
        config.db_path.display()
    );

    let written = match command {
        Command::List { filter } => {
            let visible = service.list(filter, now);
            if visible.is_empty() {
                writeln!(out, "No vaccinations yet")
            } else {
                visible
                    .iter()
                    .try_for_each(|vaccine| write_row(out, vaccine, now, config.locale))
            }
        }
        Command::Add {
            name,
            date,
            renewal,
        } => {
            let draft = VaccineDraft {
                existing_id: None,
                name,
                date: day_start(date),
                renewal,
            };
            let vaccine = service.add(draft, now).map_err(|err| err.to_string())?;
            writeln!(out, "added {}", vaccine.id())
        }
        Command::Edit {
            id,
            name,
            date,
            renewal,
        } => {
            let draft = VaccineDraft {
                existing_id: Some(id),
                name,
                date: day_start(date),
                renewal,
            };
            let vaccine = service.update(draft, now).map_err(|err| err.to_string())?;
            writeln!(out, "updated {}", vaccine.id())
        }
        Command::Delete { id } => {
            let removed = service.delete(id).map_err(|err| err.to_string())?;
            writeln!(out, "deleted {}", removed.id())
        }
        Command::Show { id } => {
            let vaccine = service
                .get(id)
                .ok_or_else(|| format!("vaccine not found: {id}"))?;
            write_detail(out, &vaccine, now, config.locale)
        }
        Command::Reminders { due } => {
            let requests = match due {
                Some(day) => scheduler.due_on(day),
                None => scheduler.pending(),
            }
            .map_err(|err| err.to_string())?;
            requests.iter().try_for_each(|request| {
                writeln!(out, "{}  {}  {}", request.fire_on, request.id, request.body)
            })
        }
        Command::Version => Ok(()),
    };

    written.map_err(|err| err.to_string())
}

fn write_row(
    out: &mut impl Write,
    vaccine: &Vaccine,
    now: DateTime<Utc>,
    locale: Locale,
) -> std::io::Result<()> {
    let status = vaccine.status(now);
    writeln!(
        out,
        "{}  {:<24} {}  [{}] {}",
        vaccine.id(),
        vaccine.name,
        vaccine.date.date_naive(),
        status.status.label(),
        vaccine.renewal_subtitle(now, locale)
    )
}

fn write_detail(
    out: &mut impl Write,
    vaccine: &Vaccine,
    now: DateTime<Utc>,
    locale: Locale,
) -> std::io::Result<()> {
    let status = vaccine.status(now);
    let interval = vaccine
        .renewal_date()
        .map(|renewal_date| RenewalInterval::between(vaccine.date, renewal_date))
        .unwrap_or_default();

    writeln!(out, "id:        {}", vaccine.id())?;
    writeln!(out, "name:      {}", vaccine.name)?;
    writeln!(out, "date:      {}", vaccine.date.date_naive())?;
    writeln!(out, "status:    {}", status.status.label())?;
    writeln!(out, "renewal:   {}", vaccine.renewal_subtitle(now, locale))?;
    if !interval.is_empty() {
        writeln!(out, "interval:  {}", interval.summary())?;
    }
    if let Some(action) = vaccine.suggested_action(now) {
        writeln!(out, "action:    {}", action.label())?;
    }
    Ok(())
}
