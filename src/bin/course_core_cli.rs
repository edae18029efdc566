use std::{
    env, fs,
    io::{self, Read},
    path::PathBuf,
    process,
};

use chrono::Utc;

use course_core::{
    cli::{self, output},
    init,
    reports,
    schedule::{
        catalog_warnings, dashboard_totals, enumerate, instructor_payouts, summarize,
        AttendanceSheet, Catalog, InstructorDirectory,
    },
    utils::persistence,
};

const CURRENCY: &str = "BHD";

fn main() {
    init();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let command = args.next().unwrap_or_else(|| {
        print_usage();
        process::exit(1);
    });

    match command.as_str() {
        "new" => {
            let name = args.next().unwrap_or_else(|| {
                print_usage();
                process::exit(1);
            });

            let catalog = Catalog::new(name);
            println!("{}", serde_json::to_string_pretty(&catalog)?);
        }
        "save" => {
            let path = args.next().map(PathBuf::from).unwrap_or_else(|| {
                print_usage();
                process::exit(1);
            });
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            let catalog: Catalog = serde_json::from_str(&buffer)?;
            persistence::save_catalog_to_file(&catalog, &path)?;
            output::success(format!("Saved catalog to {}", path.display()));
        }
        "load" => {
            let path = args.next().map(PathBuf::from).unwrap_or_else(|| {
                print_usage();
                process::exit(1);
            });
            let catalog = persistence::load_catalog_from_file(&path)?;
            for warning in catalog_warnings(&catalog) {
                output::warning(warning);
            }
            println!("{}", serde_json::to_string_pretty(&catalog)?);
        }
        "schedule" => {
            let (catalog, course_id) = catalog_and_course(&mut args)?;
            let course = find_course(&catalog, &course_id)?;
            let schedule = enumerate(course);
            print!("{}", cli::render_schedule(course, &schedule));
        }
        "summary" => {
            let (catalog, course_id) = catalog_and_course(&mut args)?;
            let course = find_course(&catalog, &course_id)?;
            let schedule = enumerate(course);
            let summary = summarize(course, &schedule);
            print!("{}", cli::render_summary(course, &summary, CURRENCY));
        }
        "dashboard" => {
            let path = args.next().map(PathBuf::from).unwrap_or_else(|| {
                print_usage();
                process::exit(1);
            });
            let catalog = persistence::load_catalog_from_file(&path)?;
            let directory = InstructorDirectory::from_profiles(&catalog.instructors);
            let totals = dashboard_totals(&catalog.courses, &directory);
            print!("{}", cli::render_dashboard(&totals, CURRENCY));
        }
        "payouts" => {
            let (catalog, course_id) = catalog_and_course(&mut args)?;
            let attendance = read_attendance(args.next())?;
            let course = find_course(&catalog, &course_id)?;
            let directory = InstructorDirectory::from_profiles(&catalog.instructors);
            let payouts = instructor_payouts(course, &attendance, &directory);
            for payout in &payouts {
                println!(
                    "{}  {} sessions  {}  {}",
                    directory.label_for(&payout.instructor_id),
                    payout.attended_sessions,
                    cli::formatters::format_hours(payout.attended_hours),
                    cli::formatters::format_currency(payout.amount, CURRENCY)
                );
            }
        }
        "invoice" => {
            let (catalog, course_id) = catalog_and_course(&mut args)?;
            let instructor_id = args.next().unwrap_or_else(|| {
                print_usage();
                process::exit(1);
            });
            let attendance = read_attendance(args.next())?;
            let course = find_course(&catalog, &course_id)?;
            let directory = InstructorDirectory::from_profiles(&catalog.instructors);
            let label = directory.label_for(&instructor_id);
            let invoice = reports::build_invoice(
                course,
                &instructor_id,
                &label,
                &attendance,
                &directory,
                Utc::now().date_naive(),
            );
            print!("{}", cli::render_invoice(&invoice, CURRENCY));
        }
        _ => {
            print_usage();
            process::exit(1);
        }
    }

    Ok(())
}

fn catalog_and_course(
    args: &mut impl Iterator<Item = String>,
) -> Result<(Catalog, String), Box<dyn std::error::Error>> {
    let path = args.next().map(PathBuf::from).unwrap_or_else(|| {
        print_usage();
        process::exit(1);
    });
    let course_id = args.next().unwrap_or_else(|| {
        print_usage();
        process::exit(1);
    });
    let catalog = persistence::load_catalog_from_file(&path)?;
    Ok((catalog, course_id))
}

fn find_course<'a>(
    catalog: &'a Catalog,
    course_id: &str,
) -> Result<&'a course_core::schedule::Course, Box<dyn std::error::Error>> {
    catalog
        .course(course_id)
        .ok_or_else(|| format!("course `{course_id}` not found in catalog").into())
}

fn read_attendance(
    path: Option<String>,
) -> Result<AttendanceSheet, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            let data = fs::read_to_string(path)?;
            Ok(serde_json::from_str(&data)?)
        }
        None => Ok(AttendanceSheet::new()),
    }
}

fn print_usage() {
    eprintln!(
        "Usage: course_core_cli <command>\n\
         Commands:\n  \
         new <name>\n  \
         save <file.json> < catalog.json\n  \
         load <file.json>\n  \
         schedule <file.json> <course-id>\n  \
         summary <file.json> <course-id>\n  \
         dashboard <file.json>\n  \
         payouts <file.json> <course-id> [attendance.json]\n  \
         invoice <file.json> <course-id> <instructor-id> [attendance.json]"
    );
}
