//! Command handlers for jaruratctl.

use anyhow::Result;
use jarurat_shared::{SupportRequest, Urgency, Volunteer};
use jaruratctl::{display, ApiClient};
use owo_colors::OwoColorize;
use uuid::Uuid;

use crate::{RegisterArgs, SubmitArgs};

pub async fn health(client: &ApiClient) -> Result<()> {
    let health = client.health().await?;
    println!("{}  {}", display::health(&health), client.base_url().dimmed());
    Ok(())
}

pub async fn list_support(client: &ApiClient, urgency: Option<Urgency>) -> Result<()> {
    let mut records = client.list_support().await?;
    if let Some(urgency) = urgency {
        records.retain(|r| r.automation.urgency == urgency);
    }
    println!("{}", display::support_table(&records));
    Ok(())
}

pub async fn show_support(client: &ApiClient, id: Uuid) -> Result<()> {
    let record = client.get_support(id).await?;
    println!("{}", display::support_detail(&record));
    Ok(())
}

pub async fn submit_support(client: &ApiClient, args: SubmitArgs) -> Result<()> {
    let mut request = SupportRequest::new(&args.name, &args.phone, &args.city, &args.state);
    request.age = args.age;
    request.patient_relation = Some(args.relation);
    request.preferred_contact = Some(args.contact);
    request.cancer_type = args.cancer_type;
    request.stage = args.stage;
    request.needs = args.needs;
    request.symptoms = args.symptoms;
    request.message = args.message;

    // Catch obvious mistakes before the round trip
    request.validate()?;

    let record = client.submit_support(&request).await?;
    println!("{} Request {} received", "[OK]".green(), record.id);
    println!();
    println!("{}", display::support_detail(&record));
    Ok(())
}

pub async fn list_volunteers(client: &ApiClient) -> Result<()> {
    let records = client.list_volunteers().await?;
    println!("{}", display::volunteer_table(&records));
    Ok(())
}

pub async fn register_volunteer(client: &ApiClient, args: RegisterArgs) -> Result<()> {
    let mut volunteer = Volunteer::new(&args.name, &args.phone, &args.city, &args.state);
    volunteer.email = args.email;
    volunteer.skills = args.skills;
    volunteer.availability_hours_per_week = args.hours;
    volunteer.motivation = args.motivation;

    volunteer.validate()?;

    let record = client.register_volunteer(&volunteer).await?;
    println!(
        "{} Volunteer {} registered as {}",
        "[OK]".green(),
        record.volunteer.full_name,
        record.id
    );
    Ok(())
}

pub async fn dashboard(client: &ApiClient) -> Result<()> {
    let summary = client.dashboard().await?;
    println!("{}", display::dashboard(&summary));
    Ok(())
}
