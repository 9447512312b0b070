//! Command table and handlers translating shell input into booking flow
//! events.

use std::fmt;

use crate::booking::{Step, SubmitOutcome, TripField};
use crate::utils::build_info;

use super::core::{closest_match, CliMode, CommandError, CommandResult, ShellContext};
use super::io;
use super::output;
use super::render;

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

/// Wizard steps on which a command may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    AnyStep,
    Only(Step),
}

impl Availability {
    pub fn allows(self, step: Step) -> bool {
        match self {
            Availability::AnyStep => true,
            Availability::Only(required) => required == step,
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Availability::AnyStep => f.write_str("any step"),
            Availability::Only(step) => write!(f, "step {}", step.number()),
        }
    }
}

pub struct BookingCommand {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub availability: Availability,
    pub handler: CommandHandler,
}

/// Every shell command in help order.
pub static COMMANDS: [BookingCommand; 11] = [
    BookingCommand {
        name: "trip",
        description: "Fill in and submit trip details",
        usage: "trip [field=value ...]",
        availability: Availability::Only(Step::TripEntry),
        handler: cmd_trip,
    },
    BookingCommand {
        name: "vehicles",
        description: "Show vehicles priced for the current trip",
        usage: "vehicles",
        availability: Availability::AnyStep,
        handler: cmd_vehicles,
    },
    BookingCommand {
        name: "select",
        description: "Choose a vehicle",
        usage: "select <vehicle-id>",
        availability: Availability::Only(Step::VehicleSelection),
        handler: cmd_select,
    },
    BookingCommand {
        name: "continue",
        description: "Review the booking",
        usage: "continue",
        availability: Availability::Only(Step::VehicleSelection),
        handler: cmd_continue,
    },
    BookingCommand {
        name: "request",
        description: "Request the confirmed booking",
        usage: "request",
        availability: Availability::Only(Step::Confirmation),
        handler: cmd_request,
    },
    BookingCommand {
        name: "back",
        description: "Return to the previous step",
        usage: "back",
        availability: Availability::AnyStep,
        handler: cmd_back,
    },
    BookingCommand {
        name: "status",
        description: "Show the current step and booking details",
        usage: "status",
        availability: Availability::AnyStep,
        handler: cmd_status,
    },
    BookingCommand {
        name: "catalog",
        description: "List the vehicles on offer",
        usage: "catalog",
        availability: Availability::AnyStep,
        handler: cmd_catalog,
    },
    BookingCommand {
        name: "version",
        description: "Show build information",
        usage: "version",
        availability: Availability::AnyStep,
        handler: cmd_version,
    },
    BookingCommand {
        name: "help",
        description: "List commands or describe one",
        usage: "help [command]",
        availability: Availability::AnyStep,
        handler: cmd_help,
    },
    BookingCommand {
        name: "exit",
        description: "Leave the shell",
        usage: "exit",
        availability: Availability::AnyStep,
        handler: cmd_exit,
    },
];

/// Case-insensitive lookup by command name.
pub fn find(name: &str) -> Option<&'static BookingCommand> {
    COMMANDS
        .iter()
        .find(|command| command.name.eq_ignore_ascii_case(name))
}

pub fn names() -> impl Iterator<Item = &'static str> {
    COMMANDS.iter().map(|command| command.name)
}

/// Commands that can run on `step`.
pub fn offered_on(step: Step) -> impl Iterator<Item = &'static BookingCommand> {
    COMMANDS
        .iter()
        .filter(move |command| command.availability.allows(step))
}

fn field_names() -> String {
    TripField::ALL
        .iter()
        .map(|field| field.key())
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        output::detail(line);
    }
}

/// Brings the newly active panel into view.
fn show_step(step: Step) {
    output::section(step);
}

fn cmd_catalog(ctx: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::section("Our fleet");
    print_lines(render::catalog_lines(ctx.flow.catalog(), ctx.flow.formatter()));
    Ok(())
}

fn cmd_trip(ctx: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        if ctx.mode == CliMode::Script {
            return Err(CommandError::InvalidArguments(format!(
                "Usage: trip field=value ... (fields: {})",
                field_names()
            )));
        }
        prompt_trip_form(ctx)?;
    }

    for arg in args {
        let field = ctx.form.set_assignment(arg).map_err(|err| {
            CommandError::InvalidArguments(format!("{}. Fields: {}", err, field_names()))
        })?;
        ctx.flow.clear_field_error(field);
    }

    match ctx.flow.submit_trip(&ctx.form) {
        SubmitOutcome::Accepted {
            summary,
            transition,
        } => {
            output::success("Trip details saved.");
            show_step(transition.to);
            print_lines(render::trip_summary_lines(&summary));
            print_lines(render::vehicle_grid_lines(
                &ctx.flow.vehicle_offers(),
                ctx.flow.formatter(),
            ));
            output::info("Choose a vehicle with `select <vehicle-id>`.");
        }
        SubmitOutcome::Rejected { errors, focus } => {
            output::warning("Please correct the trip details below.");
            for line in render::field_error_lines(&errors) {
                output::error(line);
            }
            output::info(format!("Start with `{}`.", focus.key()));
        }
        SubmitOutcome::Ignored => {
            output::warning("Trip details can only be changed on step 1.");
        }
    }
    Ok(())
}

fn prompt_trip_form(ctx: &mut ShellContext) -> CommandResult {
    show_step(Step::TripEntry);
    for field in TripField::ALL {
        let current = ctx.form.get(field).to_string();
        let label = match ctx.flow.field_errors().get(field) {
            Some(message) => format!("{} ({})", field.label(), message),
            None => field.label().to_string(),
        };
        let value = io::prompt_field(&ctx.theme, &label, &current)?;
        if value != current {
            ctx.flow.clear_field_error(field);
        }
        ctx.form.set(field, value);
    }
    Ok(())
}

fn cmd_vehicles(ctx: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let Some(trip) = ctx.flow.state().trip() else {
        output::warning("Submit your trip details first with `trip`.");
        return Ok(());
    };
    print_lines(render::trip_summary_lines(&trip.summary()));
    print_lines(render::vehicle_grid_lines(
        &ctx.flow.vehicle_offers(),
        ctx.flow.formatter(),
    ));
    Ok(())
}

fn cmd_select(ctx: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(id) = args.first() else {
        return Err(CommandError::InvalidArguments(
            "Usage: select <vehicle-id>".into(),
        ));
    };
    if ctx.flow.select_vehicle(id) {
        let name = ctx
            .flow
            .state()
            .selected_vehicle(ctx.flow.catalog())
            .map(|vehicle| vehicle.name.clone())
            .unwrap_or_default();
        output::success(format!("Selected {}.", name));
        output::info("Use `continue` to review your booking.");
    } else {
        output::warning(format!("No vehicle with id `{}`.", id));
        if let Some(best) = closest_match(id, ctx.flow.catalog().ids()) {
            output::info(format!("Suggestion: `{}`?", best));
        }
    }
    Ok(())
}

fn cmd_continue(ctx: &mut ShellContext, _args: &[&str]) -> CommandResult {
    match ctx.flow.advance() {
        Some(transition) => {
            show_step(transition.to);
            if let Some(view) = ctx.flow.confirmation() {
                print_lines(render::confirmation_lines(&view, ctx.flow.formatter()));
            }
            output::info("Use `request` to send the booking request or `back` to change the vehicle.");
        }
        None => output::warning("Select a vehicle before continuing."),
    }
    Ok(())
}

fn cmd_back(ctx: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let Some(transition) = ctx.flow.back() else {
        output::info("Already on the first step.");
        return Ok(());
    };
    show_step(transition.to);
    if transition.to == Step::VehicleSelection {
        print_lines(render::vehicle_grid_lines(
            &ctx.flow.vehicle_offers(),
            ctx.flow.formatter(),
        ));
    }
    Ok(())
}

fn cmd_request(ctx: &mut ShellContext, _args: &[&str]) -> CommandResult {
    match ctx.flow.request_booking() {
        Some(ack) => {
            output::success(&ack.message);
            output::detail(format!("Reference: {}", ack.reference));
        }
        None => output::warning("Review your booking on step 3 before requesting it."),
    }
    Ok(())
}

fn cmd_status(ctx: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let flow = &ctx.flow;
    output::section(flow.current_step());
    match flow.state().trip() {
        Some(trip) => print_lines(render::trip_summary_lines(&trip.summary())),
        None => output::detail("No trip details yet."),
    }
    match flow.state().selected_vehicle(flow.catalog()) {
        Some(vehicle) => output::detail(format!("Selected vehicle: {}", vehicle.name)),
        None => output::detail("No vehicle selected."),
    }
    if !flow.field_errors().is_empty() {
        for line in render::field_error_lines(flow.field_errors()) {
            output::error(line);
        }
    }
    Ok(())
}

fn cmd_version(_ctx: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::info(build_info::current().summary());
    Ok(())
}

fn cmd_help(ctx: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        let Some(command) = find(name) else {
            return Err(CommandError::InvalidArguments(format!(
                "No help for unknown command `{}`.",
                name
            )));
        };
        output::info(format!("{}: {}", command.name, command.description));
        output::detail(format!("Usage: {}", command.usage));
        output::detail(format!("Available on: {}", command.availability));
        if command.name == "trip" {
            output::detail(format!("Fields: {}", field_names()));
        }
        return Ok(());
    }
    let step = ctx.flow.current_step();
    output::section("Commands");
    for command in &COMMANDS {
        let marker = if command.availability.allows(step) { ' ' } else { '-' };
        output::detail(format!(
            "{} {:<10} {} ({})",
            marker, command.name, command.description, command.availability
        ));
    }
    output::detail("Commands marked `-` are not available on this step.");
    Ok(())
}

fn cmd_exit(_ctx: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
