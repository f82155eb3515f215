use crate::infra::{reference_categories, reference_countries, InMemoryLeadRepository};
use chrono::Local;
use clap::Args;
use std::sync::Arc;
use visa_leads::error::AppError;
use visa_leads::workflows::leads::{
    ApplicationId, AuthenticatedUser, LeadListQuery, LeadReviewService, LeadServiceError,
    LeadSubmission, ResumeUpload,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Number of sample leads to seed
    #[arg(long, default_value_t = 12)]
    pub(crate) leads: usize,
    /// Search text applied to the printed listing
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// Status filter applied to the printed listing (PENDING or REACHED_OUT)
    #[arg(long)]
    pub(crate) status: Option<String>,
    /// Page of the listing to print
    #[arg(long)]
    pub(crate) page: Option<String>,
}

const SAMPLE_APPLICANTS: &[(&str, &str, &str)] = &[
    ("Maria", "Santos", "BR"),
    ("Priya", "Sharma", "IN"),
    ("Lukas", "Weber", "DE"),
    ("Amara", "Okafor", "NG"),
    ("Wei", "Zhang", "CN"),
    ("Sofia", "Alvarez", "MX"),
    ("James", "Carter", "US"),
    ("Elodie", "Martin", "FR"),
    ("Oliver", "Hughes", "GB"),
    ("Emma", "Tremblay", "CA"),
];

fn sample_submission(index: usize) -> LeadSubmission {
    let (first, last, country) = SAMPLE_APPLICANTS[index % SAMPLE_APPLICANTS.len()];
    let file_name = format!("{}_{}.pdf", first.to_lowercase(), last.to_lowercase());
    let content_type = mime_guess::from_path(&file_name)
        .first_or_octet_stream()
        .to_string();

    LeadSubmission {
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: format!("{}.{}@example.com", first.to_lowercase(), last.to_lowercase()),
        website: Some(format!("https://{}.example.com", last.to_lowercase())),
        additional_details: format!("Sample application #{} seeded for the demo.", index + 1),
        citizenship: Some(country.to_string()),
        categories: vec![(index % 3 + 1) as u16],
        resume: ResumeUpload {
            file_name,
            content_type,
            content: b"%PDF-1.4 demo resume".to_vec(),
        },
    }
}

fn demo_reviewer() -> AuthenticatedUser {
    AuthenticatedUser {
        id: "demo-reviewer".to_string(),
        email: "reviewer@visa-leads.local".to_string(),
    }
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        leads,
        search,
        status,
        page,
    } = args;

    let repository = Arc::new(InMemoryLeadRepository::new(
        reference_countries(),
        reference_categories(),
    ));
    let service = LeadReviewService::new(repository);
    let reviewer = demo_reviewer();

    println!(
        "Visa leads demo ({})",
        Local::now().format("%Y-%m-%d %H:%M")
    );

    let mut seeded_ids = Vec::new();
    for index in 0..leads.max(1) {
        match service.submit(sample_submission(index)) {
            Ok(receipt) => seeded_ids.push(ApplicationId(receipt.id)),
            Err(err) => println!("  seed {index} rejected: {err}"),
        }
    }
    println!("Seeded {} sample leads.", seeded_ids.len());

    // Reach out to every third lead so the listing shows both states.
    for id in seeded_ids.iter().step_by(3) {
        if let Err(err) = service.mark_reached_out(&reviewer, id) {
            println!("  could not reach out to {id}: {err}");
        }
    }

    let query = LeadListQuery {
        search,
        status,
        page,
    };
    let listing = service.list(&reviewer, &query)?;

    println!(
        "\nLeads page {}/{} ({} total)",
        listing.page,
        listing.total_pages.max(1),
        listing.total
    );
    for lead in &listing.leads {
        println!(
            "  {:<12} {:<24} {:<12} {:<16} {}",
            lead.id, lead.name, lead.status, lead.country, lead.submitted
        );
    }
    if listing.leads.is_empty() {
        println!("  (no rows on this page)");
    }

    if let Some(id) = seeded_ids.first() {
        let detail = service.detail(&reviewer, id)?;
        println!("\nDetail for {}:", detail.id);
        if let Ok(json) = serde_json::to_string_pretty(&detail) {
            println!("{json}");
        }

        // The transition is one-way: the first lead was reached out during
        // seeding, so a second attempt surfaces the conflict outcome.
        match service.mark_reached_out(&reviewer, id) {
            Err(LeadServiceError::AlreadyReachedOut) => {
                println!("\nSecond reach-out on {id} correctly reported the conflict.");
            }
            Ok(_) => println!("\nReached out to {id}."),
            Err(err) => println!("\nUnexpected reach-out failure for {id}: {err}"),
        }
    }

    Ok(())
}
