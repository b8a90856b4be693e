//! Ticketdesk
//!
//! Command-line entry point

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;

use ticketdesk::{
    config::Settings,
    handlers::{
        self,
        account::{handle_login, handle_logout, handle_whoami},
        admin::{handle_admin, AdminAction},
        bookings::{handle_book, handle_cancel, handle_my_bookings, handle_pay, handle_receipt, AttendeeInput},
        dashboard::handle_dashboard,
        events::{handle_event_detail, handle_events},
    },
    models::FileUpload,
    services::{EventFilter, PaymentDetails, PriceFilter, Resource, ServiceFactory},
    utils::logging,
    TicketdeskError,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Browse events, book tickets and manage the ticketing back office")]
struct Cli {
    /// Configuration file, extension optional
    #[arg(long, default_value = "config", env = "TICKETDESK_CONFIG")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and store the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "TICKETDESK_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the logged-in account
    Whoami,
    /// List and search events
    Events {
        /// Matches event details, place, category and contact name
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        category: Option<i64>,
        #[arg(long)]
        place: Option<i64>,
        #[arg(long, conflicts_with = "paid")]
        free: bool,
        #[arg(long)]
        paid: bool,
    },
    /// Show one event
    Event { id: i64 },
    /// Book a ticket for an event
    Book {
        event_id: i64,
        #[arg(long)]
        name: String,
        /// Defaults to the account email
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        address: String,
        #[arg(long)]
        city: String,
        #[arg(long)]
        state: String,
        #[arg(long)]
        country: String,
        /// ID proof document (pdf, jpg, jpeg or png)
        #[arg(long)]
        id_proof: Option<PathBuf>,
    },
    /// Pay for a booking
    Pay {
        booking_id: i64,
        #[arg(long, value_enum)]
        method: MethodArg,
        #[arg(long)]
        holder: Option<String>,
        #[arg(long)]
        card_number: Option<String>,
        /// MM/YY
        #[arg(long)]
        expiry: Option<String>,
        #[arg(long)]
        cvv: Option<String>,
        #[arg(long)]
        bank: Option<String>,
    },
    /// Print the receipt of a booking
    Receipt { booking_id: i64 },
    /// List your bookings
    MyBookings,
    /// Cancel one of your bookings
    Cancel { booking_id: i64 },
    /// Show the dashboard for your role
    Dashboard,
    /// Back-office management
    Admin {
        #[arg(value_parser = parse_resource)]
        resource: Resource,
        #[command(subcommand)]
        action: AdminCommand,
    },
    /// Print the effective configuration
    Config,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum MethodArg {
    Card,
    Qr,
    Netbanking,
}

#[derive(Subcommand, Debug)]
enum AdminCommand {
    List,
    Show { id: i64 },
    Delete { id: i64 },
    /// Create from a JSON form file
    Create {
        file: PathBuf,
        /// Event image or booking ID proof
        #[arg(long)]
        upload: Option<PathBuf>,
    },
    /// Update from a JSON form file
    Update {
        id: i64,
        file: PathBuf,
        #[arg(long)]
        upload: Option<PathBuf>,
    },
}

impl From<AdminCommand> for AdminAction {
    fn from(command: AdminCommand) -> Self {
        match command {
            AdminCommand::List => AdminAction::List,
            AdminCommand::Show { id } => AdminAction::Show { id },
            AdminCommand::Delete { id } => AdminAction::Delete { id },
            AdminCommand::Create { file, upload } => AdminAction::Create { file, upload },
            AdminCommand::Update { id, file, upload } => AdminAction::Update { id, file, upload },
        }
    }
}

fn parse_resource(value: &str) -> Result<Resource, String> {
    value.parse().map_err(|e: TicketdeskError| e.to_string())
}

fn payment_details(
    method: MethodArg,
    holder: Option<String>,
    card_number: Option<String>,
    expiry: Option<String>,
    cvv: Option<String>,
    bank: Option<String>,
) -> PaymentDetails {
    match method {
        MethodArg::Card => PaymentDetails::Card {
            holder: holder.unwrap_or_default(),
            number: card_number.unwrap_or_default(),
            expiry: expiry.unwrap_or_default(),
            cvv: cvv.unwrap_or_default(),
        },
        MethodArg::Qr => PaymentDetails::Qr,
        MethodArg::Netbanking => PaymentDetails::NetBanking {
            bank: bank.unwrap_or_default(),
        },
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    // Load configuration
    let settings = match load_settings(&cli.config) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::from(2);
        }
    };

    // Initialize logging
    let _guard = match logging::init_logging(&settings.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    debug!("Starting {}", ticketdesk::info());

    let mut stdout = io::stdout();
    let result = run(cli.command, &settings, &mut stdout).await;
    let _ = stdout.flush();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            handlers::report_error(&mut io::stderr(), &e);
            ExitCode::FAILURE
        }
    }
}

fn load_settings(name: &str) -> anyhow::Result<Settings> {
    let settings = Settings::from_file(name).with_context(|| format!("Failed to load configuration '{}'", name))?;
    settings.validate().context("Invalid configuration")?;
    Ok(settings)
}

async fn run<W: Write>(command: Command, settings: &Settings, out: &mut W) -> ticketdesk::Result<()> {
    if let Command::Config = command {
        let rendered = settings
            .to_toml()
            .map_err(|e| TicketdeskError::Config(e.to_string()))?;
        write!(out, "{}", rendered)?;
        return Ok(());
    }

    let services = ServiceFactory::from_settings(settings)?;
    debug!(authenticated = services.session().is_authenticated(), "Services initialized");

    match command {
        Command::Login { email, password } => handle_login(&services, out, &email, &password).await,
        Command::Logout => handle_logout(&services, out),
        Command::Whoami => handle_whoami(&services, out),
        Command::Events { search, category, place, free, paid } => {
            let price = match (free, paid) {
                (true, _) => PriceFilter::Free,
                (_, true) => PriceFilter::Paid,
                _ => PriceFilter::Any,
            };
            let filter = EventFilter {
                text: search,
                category_id: category,
                place_id: place,
                price,
            };
            handle_events(&services, out, &filter).await
        }
        Command::Event { id } => handle_event_detail(&services, out, id).await,
        Command::Book { event_id, name, email, phone, address, city, state, country, id_proof } => {
            let attendee = AttendeeInput { name, email, phone, address, city, state, country };
            let id_proof = match id_proof {
                Some(path) => Some(FileUpload::from_path(path).await?),
                None => None,
            };
            handle_book(&services, out, event_id, attendee, id_proof).await
        }
        Command::Pay { booking_id, method, holder, card_number, expiry, cvv, bank } => {
            let details = payment_details(method, holder, card_number, expiry, cvv, bank);
            handle_pay(&services, out, booking_id, &details).await
        }
        Command::Receipt { booking_id } => handle_receipt(&services, out, booking_id).await,
        Command::MyBookings => handle_my_bookings(&services, out).await,
        Command::Cancel { booking_id } => handle_cancel(&services, out, booking_id).await,
        Command::Dashboard => handle_dashboard(&services, out).await,
        Command::Admin { resource, action } => handle_admin(&services, out, resource, action.into()).await,
        Command::Config => Ok(()),
    }
}
