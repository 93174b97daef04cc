use clap::{Arg, ArgMatches, Command};
use std::process::ExitCode;
use std::sync::Arc;

use foodshare_client::config::ClientOptions;
use foodshare_client::identity::{IdentityProvider, StaticIdentity};
use foodshare_client::listings::{category_label, CategoryFilter};
use foodshare_client::requests::RequestStatus;
use foodshare_client::session::DashboardSession;
use foodshare_client::submission::{RequestForm, SubmissionOutcome};
use foodshare_client::FoodShare;

fn cli() -> Command<'static> {
    Command::new("foodshare")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Browse FoodShare listings and manage pickup requests")
        .arg(
            Arg::new("origin")
                .long("origin")
                .value_name("URL")
                .takes_value(true)
                .help("Backend origin, overrides FOODSHARE_API_ORIGIN"),
        )
        .subcommand_required(true)
        .subcommand(
            Command::new("browse")
                .about("List available food")
                .arg(
                    Arg::new("search")
                        .short('s')
                        .long("search")
                        .value_name("TERM")
                        .takes_value(true)
                        .default_value(""),
                )
                .arg(
                    Arg::new("category")
                        .short('c')
                        .long("category")
                        .value_name("CATEGORY")
                        .takes_value(true)
                        .default_value("all"),
                ),
        )
        .subcommand(Command::new("requests").about("Show my requests"))
        .subcommand(
            Command::new("request")
                .about("Request food from a listing")
                .arg(Arg::new("listing").value_name("LISTING_ID").required(true))
                .arg(
                    Arg::new("quantity")
                        .short('q')
                        .long("quantity")
                        .value_name("QUANTITY")
                        .takes_value(true)
                        .required(true),
                )
                .arg(
                    Arg::new("message")
                        .short('m')
                        .long("message")
                        .value_name("TEXT")
                        .takes_value(true)
                        .required(true),
                )
                .arg(
                    Arg::new("requester")
                        .long("requester")
                        .value_name("ID")
                        .takes_value(true)
                        .help("Requester id, defaults to the shared placeholder account"),
                ),
        )
}

fn options(matches: &ArgMatches) -> foodshare_client::error::Result<ClientOptions> {
    match matches.value_of("origin") {
        Some(origin) => Ok(ClientOptions::default().with_origin(origin)),
        None => ClientOptions::from_env(),
    }
}

async fn browse(session: &DashboardSession, matches: &ArgMatches) {
    let search = matches.value_of("search").unwrap_or("");
    let category = CategoryFilter::from(matches.value_of("category").unwrap_or("all"));

    let listings = session.filtered_listings(search, &category).await;
    if listings.is_empty() {
        println!("No food posts match.");
        return;
    }

    for listing in listings {
        println!(
            "[{}] {} ({}) from {}",
            listing.id,
            listing.title_or_empty(),
            listing.category.as_deref().map(category_label).unwrap_or("uncategorized"),
            listing.donor_display_name(),
        );
        if let Some(quantity) = &listing.quantity {
            println!("    quantity: {}", quantity);
        }
        if let Some(expiry) = &listing.expiry_time {
            println!("    expires in {}", expiry);
        }
    }
}

const SUMMARY_STATUSES: [RequestStatus; 4] = [
    RequestStatus::Pending,
    RequestStatus::Approved,
    RequestStatus::Rejected,
    RequestStatus::Completed,
];

async fn requests(session: &DashboardSession) {
    let requests = session.my_requests().await;
    if requests.is_empty() {
        println!("No requests yet.");
        return;
    }

    for request in requests {
        println!(
            "{:<10} {} from {} ({}, {})",
            request.status.label(),
            request.post_title,
            request.donor,
            request.quantity,
            request.requested_at,
        );
    }

    let mut summary = Vec::new();
    for status in SUMMARY_STATUSES {
        let count = session.count_requests(&status).await;
        if count > 0 {
            summary.push(format!("{} {}", count, status.label()));
        }
    }
    if !summary.is_empty() {
        println!("\n{}", summary.join(", "));
    }
}

async fn request(session: &DashboardSession, matches: &ArgMatches) -> bool {
    let listing = matches.value_of("listing").unwrap_or_default();
    let form = RequestForm::new(
        matches.value_of("quantity").unwrap_or_default(),
        matches.value_of("message").unwrap_or_default(),
    );

    match session.submit_request(&listing.into(), &form).await {
        SubmissionOutcome::Succeeded(request) => {
            println!("Request {} sent: {}", request.id, request.status.label());
            true
        }
        SubmissionOutcome::Rejected(reason) => {
            eprintln!("Not sent: {}", reason);
            false
        }
        SubmissionOutcome::Failed(e) => {
            eprintln!("Request failed: {}", e);
            false
        }
        SubmissionOutcome::Discarded => false,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    pretty_env_logger::init();

    let matches = cli().get_matches();

    let foodshare = match options(&matches).and_then(FoodShare::new_with_options) {
        Ok(foodshare) => foodshare,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let identity: Arc<dyn IdentityProvider> = match matches
        .subcommand_matches("request")
        .and_then(|m| m.value_of("requester"))
    {
        Some(id) => Arc::new(StaticIdentity::new(id)),
        None => Arc::new(StaticIdentity::placeholder()),
    };

    let session = foodshare.session(identity);

    let ok = match matches.subcommand() {
        Some(("browse", sub)) => {
            session.reload_listings().await;
            browse(&session, sub).await;
            true
        }
        Some(("requests", _)) => {
            session.reload_requests().await;
            requests(&session).await;
            true
        }
        Some(("request", sub)) => request(&session, sub).await,
        _ => false,
    };

    session.close();

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_browse_defaults() {
        let matches = cli().try_get_matches_from(["foodshare", "browse"]).unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "browse");
        assert_eq!(sub.value_of("category"), Some("all"));
        assert_eq!(sub.value_of("search"), Some(""));
    }

    #[test]
    fn request_requires_quantity_and_message() {
        assert!(cli().try_get_matches_from(["foodshare", "request", "7"]).is_err());
        assert!(cli()
            .try_get_matches_from(["foodshare", "request", "7", "-q", "5kg", "-m", "For shelter"])
            .is_ok());
    }
}
