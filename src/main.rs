use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

use ticketdesk::auth::{AuthContext, FileSessionStore, Route};
use ticketdesk::models::lenient::parse_datetime;
use ticketdesk::models::{Address, PaymentMethod, TicketType};
use ticketdesk::pricing::{format_money, PriceTable};
use ticketdesk::utils::notice::Notice;
use ticketdesk::views::catalog::{Catalog, CatalogQuery};
use ticketdesk::views::dashboard::{load_dashboard, Dashboard, DashboardScope};
use ticketdesk::views::event_detail::{load_event_detail, DetailState, NOT_FOUND_TITLE};
use ticketdesk::views::event_management::{create_event, load_event_manager, CreateOutcome, EventDraft};
use ticketdesk::views::health::{check_health, Health};
use ticketdesk::views::my_tickets::load_my_tickets;
use ticketdesk::views::profile::load_profile;
use ticketdesk::views::purchase::{purchase, PurchaseForm, PurchaseOutcome};
use ticketdesk::views::ticket_management::load_ticket_board;
use ticketdesk::views::venues::{create_venue, load_venues, VenueDraft};
use ticketdesk::views::Gated;
use ticketdesk::{ApiClient, ClientError, ClientResult, Config};

#[derive(Parser)]
#[command(name = "ticketdesk", version, about = "Browse events, buy tickets and run the box office")]
struct Cli {
    /// Backend base URL
    #[arg(long, global = true, env = "TICKETDESK_API_URL")]
    api_url: Option<String>,

    /// Where the logged-in identity is kept
    #[arg(long, global = true, env = "TICKETDESK_SESSION_FILE")]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in with a seeded account
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the saved identity
    Logout,
    /// Show who is logged in
    Whoami,
    /// Create a customer account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value = "")]
        phone: String,
    },
    /// List events
    Events {
        /// Server-side title search
        #[arg(long)]
        search: Option<String>,
        /// Only published events
        #[arg(long)]
        published: bool,
        /// Local filter on title or description
        #[arg(long)]
        filter: Option<String>,
    },
    /// Show one event with its prices
    Event { id: String },
    /// Buy tickets for an event
    Buy {
        event_id: String,
        #[arg(long = "type", default_value = "STANDARD")]
        ticket_type: TicketType,
        #[arg(long, default_value_t = 1)]
        quantity: u32,
        #[arg(long, default_value = "CREDIT_CARD")]
        payment: PaymentMethod,
    },
    /// List your tickets
    Tickets,
    /// List every ticket, optionally validating one
    ManageTickets {
        #[arg(long)]
        filter: Option<String>,
        /// Ticket id to mark as used
        #[arg(long)]
        validate: Option<String>,
    },
    /// List the events you organize
    MyEvents,
    /// Create an unpublished event
    CreateEvent {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long, value_parser = parse_when)]
        date: DateTime<Utc>,
        #[arg(long, value_parser = parse_when)]
        end_date: Option<DateTime<Utc>>,
        #[arg(long)]
        venue: String,
        #[arg(long)]
        price: Decimal,
        #[arg(long)]
        seats: u32,
        #[arg(long = "category")]
        categories: Vec<String>,
        #[arg(long)]
        image_url: Option<String>,
    },
    /// Publish one of your events
    Publish { id: String },
    /// Delete one of your events
    Delete { id: String },
    /// List venues
    Venues {
        #[arg(long)]
        filter: Option<String>,
    },
    /// Add a venue (admin only)
    CreateVenue {
        #[arg(long)]
        name: String,
        #[arg(long)]
        capacity: u32,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        street: String,
        #[arg(long, default_value = "")]
        city: String,
        #[arg(long, default_value = "")]
        state: String,
        #[arg(long, default_value = "")]
        zip: String,
        #[arg(long, default_value = "")]
        country: String,
    },
    /// Show dashboard metrics for your role
    Dashboard,
    /// Show your profile
    Profile,
    /// Probe the backend
    Health,
}

fn parse_when(raw: &str) -> Result<DateTime<Utc>, String> {
    parse_datetime(raw).ok_or_else(|| format!("invalid date '{}'", raw))
}

/// Prints where the caller was sent and turns the refusal into an error.
fn redirected<T>(gated: Gated<T>) -> ClientResult<T> {
    match gated {
        Gated::Ready(value) => Ok(value),
        Gated::Redirect(Route::Login) => {
            eprintln!("Redirecting to {}", Route::Login);
            Err(ClientError::Unauthenticated)
        }
        Gated::Redirect(route) => {
            eprintln!("Redirecting to {}", route);
            Err(ClientError::Forbidden(
                "You don't have permission to view this page".to_string(),
            ))
        }
    }
}

/// A failed load becomes the command's error.
fn fail_on(notice: Option<Notice>) -> ClientResult<()> {
    match notice {
        Some(notice) => Err(ClientError::Validation(notice.description)),
        None => Ok(()),
    }
}

/// Prints a success notice, or returns an error one.
fn report(notice: Notice) -> ClientResult<()> {
    if notice.is_error() {
        return Err(ClientError::Validation(notice.description));
    }
    println!("{}", notice);
    Ok(())
}

async fn run(cli: Cli) -> ClientResult<()> {
    let mut config = Config::from_env()?;
    if let Some(url) = cli.api_url {
        config.api_base_url = url;
    }
    if let Some(path) = cli.session_file {
        config.session_file = path;
    }

    let api = ApiClient::new(&config)?;
    let prices = PriceTable::new(config.early_bird_multiplier);
    let mut auth = AuthContext::restore(FileSessionStore::new(config.session_file.clone()))?;

    match cli.command {
        Commands::Login { email, password } => {
            if !auth.login(&email, &password)? {
                return Err(ClientError::Validation(
                    "Invalid email or password".to_string(),
                ));
            }
            if let Some(user) = auth.user() {
                println!("Logged in as {} ({})", user.name, user.role);
            }
        }
        Commands::Logout => {
            auth.logout()?;
            println!("Logged out");
        }
        Commands::Whoami => match auth.user() {
            Some(user) => println!("{} <{}> {}", user.name, user.email, user.role),
            None => println!("Not logged in"),
        },
        Commands::Register {
            name,
            email,
            password,
            phone,
        } => {
            let user = auth.register(&api, &name, &email, &password, &phone).await?;
            println!("Registered {} <{}>. You can now log in.", user.name, user.email);
        }
        Commands::Events {
            search,
            published,
            filter,
        } => {
            let mut query = match search {
                Some(text) => CatalogQuery::search(text),
                None => CatalogQuery::all(),
            };
            if published {
                query = query.published();
            }

            let catalog = Catalog::new(api);
            catalog.load(query).await;
            let view = catalog.view(filter.as_deref().unwrap_or(""));
            fail_on(view.error)?;
            if let Some(message) = view.empty_message {
                println!("{}", message);
            }
            for card in view.cards {
                println!(
                    "[{}] {} | {} {} | {} | {} | {}",
                    card.id, card.title, card.dates, card.time, card.venue, card.price, card.seats_left
                );
            }
        }
        Commands::Event { id } => match load_event_detail(&api, &id).await {
            DetailState::Loaded(detail) => {
                let event = &detail.event;
                println!("{}", event.title);
                println!("{}", event.description);
                println!("When:  {} {}", detail.dates(), detail.time());
                if let Some(venue) = detail.venue_line() {
                    println!("Where: {}", venue);
                }
                println!("Seats: {}", event.seats_label());
                println!("{}", detail.availability().message());
                for (_, label) in detail.price_options(&prices)? {
                    println!("  {}", label);
                }
            }
            DetailState::NotFound { notice } => {
                eprintln!("{}", NOT_FOUND_TITLE);
                return Err(ClientError::Validation(notice.description));
            }
        },
        Commands::Buy {
            event_id,
            ticket_type,
            quantity,
            payment,
        } => {
            let event = api.get_event(&event_id).await?;
            let form = PurchaseForm {
                ticket_type,
                quantity,
                payment_method: payment,
            };
            match purchase(&api, &prices, auth.user(), &event, &form).await {
                PurchaseOutcome::Completed {
                    order,
                    quote,
                    redirect,
                    notice,
                    refreshed,
                } => {
                    println!("{}", notice);
                    println!(
                        "Order {}: {} x {} at {} = {}",
                        order.id,
                        quote.quantity,
                        quote.ticket_type.label(),
                        format_money(quote.unit_price),
                        format_money(quote.total)
                    );
                    if let Some(event) = refreshed {
                        println!("{}", event.seats_label());
                    }
                    println!("See {}", redirect);
                }
                PurchaseOutcome::Rejected { notice, redirect } => {
                    if let Some(route) = redirect {
                        eprintln!("Redirecting to {}", route);
                    }
                    return Err(ClientError::Validation(notice.description));
                }
                PurchaseOutcome::Failed { notice } => {
                    return Err(ClientError::Validation(notice.description));
                }
            }
        }
        Commands::Tickets => {
            let tickets = redirected(load_my_tickets(&api, auth.user()).await)?;
            fail_on(tickets.error.clone())?;
            if let Some(message) = tickets.empty_message() {
                println!("{}", message);
            }
            let now = Utc::now();
            for entry in &tickets.entries {
                println!(
                    "{} | {} | {} | {} | {} | {} | {}",
                    entry.ticket.ticket_number,
                    entry.event_title(),
                    entry.event_date(),
                    entry.venue(),
                    entry.ticket.ticket_type.label(),
                    entry.price(),
                    entry.status(now).label()
                );
            }
        }
        Commands::ManageTickets { filter, validate } => {
            let mut board = redirected(load_ticket_board(&api, auth.user()).await)?;
            fail_on(board.error.clone())?;
            if let Some(ticket_id) = validate {
                report(board.validate(&api, &ticket_id).await)?;
            }
            for entry in board.filter(filter.as_deref().unwrap_or("")) {
                println!(
                    "{} | {} | {} | {}",
                    entry.ticket.ticket_number,
                    entry.event_title(),
                    entry.ticket.ticket_type.label(),
                    if entry.ticket.used { "Used" } else { "Valid" }
                );
            }
        }
        Commands::MyEvents => {
            let manager = redirected(load_event_manager(&api, auth.user()).await)?;
            fail_on(manager.error.clone())?;
            for event in &manager.events {
                println!(
                    "[{}] {} | {} | {}",
                    event.id,
                    event.title,
                    if event.published { "Published" } else { "Draft" },
                    event.seats_label()
                );
            }
        }
        Commands::CreateEvent {
            title,
            description,
            date,
            end_date,
            venue,
            price,
            seats,
            categories,
            image_url,
        } => {
            let mut draft = EventDraft {
                title,
                description,
                event_date: Some(date),
                end_date,
                venue_id: venue,
                image_url,
                base_price: price,
                total_seats: seats,
                ..EventDraft::default()
            };
            for category in &categories {
                draft.add_category(category);
            }

            match redirected(create_event(&api, auth.user(), draft).await)? {
                CreateOutcome::Created {
                    event,
                    notice,
                    redirect,
                } => {
                    println!("{}", notice);
                    println!("Created [{}] {}. See {}", event.id, event.title, redirect);
                }
                CreateOutcome::Rejected { notice } => {
                    return Err(ClientError::Validation(notice.description));
                }
            }
        }
        Commands::Publish { id } => {
            let mut manager = redirected(load_event_manager(&api, auth.user()).await)?;
            report(manager.publish(&api, &id).await)?;
        }
        Commands::Delete { id } => {
            let mut manager = redirected(load_event_manager(&api, auth.user()).await)?;
            report(manager.delete(&api, &id).await)?;
        }
        Commands::Venues { filter } => {
            let list = load_venues(&api, auth.user()).await;
            fail_on(list.error.clone())?;
            let query = filter.as_deref().unwrap_or("");
            if let Some(message) = list.empty_message(query) {
                println!("{}", message);
            }
            for venue in list.filter(query) {
                println!(
                    "[{}] {} | {} | capacity {}",
                    venue.id,
                    venue.name,
                    venue.address.one_line(),
                    venue.capacity
                );
            }
        }
        Commands::CreateVenue {
            name,
            capacity,
            description,
            street,
            city,
            state,
            zip,
            country,
        } => {
            let draft = VenueDraft {
                name,
                capacity,
                description,
                address: Address {
                    street,
                    city,
                    state,
                    zip_code: zip,
                    country,
                },
                image_url: None,
            };
            let venue = redirected(create_venue(&api, auth.user(), draft).await)??;
            println!("Created venue [{}] {}", venue.id, venue.name);
        }
        Commands::Dashboard => {
            let dashboard = redirected(load_dashboard(&api, auth.user()).await)?;
            if let Some(notice) = &dashboard.notice {
                eprintln!("{}", notice);
            }
            print_dashboard(&dashboard);
            if let Some(error) = dashboard.error {
                return Err(ClientError::Validation(error));
            }
        }
        Commands::Profile => {
            let profile = redirected(load_profile(&api, auth.user()).await)?;
            let user = &profile.user;
            println!("{} <{}>", user.name, user.email);
            println!("Role:         {}", user.role);
            println!("Phone:        {}", profile.phone());
            println!("Member since: {}", profile.member_since());
        }
        Commands::Health => {
            let health = check_health(&api).await;
            println!("Backend {}: {}", api.base_url(), health.label());
            if let Health::Offline { error, .. } = health {
                return Err(ClientError::Validation(error));
            }
        }
    }

    Ok(())
}

fn print_dashboard(dashboard: &Dashboard) {
    let m = &dashboard.metrics;
    match dashboard.scope {
        DashboardScope::Admin => {
            println!(
                "Users:   {} ({})",
                m.user_count,
                Dashboard::growth_label(m.user_growth)
            );
            println!(
                "Events:  {} ({})",
                m.event_count,
                Dashboard::growth_label(m.event_growth)
            );
        }
        DashboardScope::Organizer => {
            println!(
                "Events:    {} ({})",
                m.event_count,
                Dashboard::growth_label(m.event_growth)
            );
            println!("Attendees: {}", m.attendee_count);
        }
    }
    println!(
        "Tickets: {} ({})",
        m.ticket_count,
        Dashboard::growth_label(m.ticket_growth)
    );
    println!(
        "Revenue: {} ({})",
        dashboard.revenue(),
        Dashboard::growth_label(m.revenue_growth)
    );
    for event in &m.top_events {
        println!(
            "  {} | {} sold | {}",
            event.title,
            event.tickets_sold,
            format_money(event.revenue)
        );
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ticketdesk=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err.public_message());
            ExitCode::FAILURE
        }
    }
}
