//! Contact command implementations.

use colored::Colorize;
use serde::Serialize;

use crate::app::App;
use crate::cli::{ContactAddArgs, ContactCommands, ContactListArgs, ContactUpdateArgs};
use crate::error::{Error, Result};
use crate::model::{Contact, ContactId, ContactPatch, ContactStatus, NewContact, Task};
use crate::nav::Route;
use crate::query::{ContactFilter, ContactStats};
use crate::store::parse_numeric_id;
use crate::validate;

#[derive(Serialize)]
struct ContactListOutput<'a> {
    contacts: Vec<&'a Contact>,
    count: usize,
    stats: ContactStats,
}

#[derive(Serialize)]
struct ContactShowOutput {
    contact: Contact,
    tasks: Vec<Task>,
}

/// Execute contact commands.
///
/// # Errors
///
/// Returns an error if the route is gated, input is invalid, or the contact
/// does not exist.
pub fn execute(app: &mut App, command: &ContactCommands, json: bool) -> Result<()> {
    match command {
        ContactCommands::List(args) => list(app, args, json),
        ContactCommands::Show { id } => show(app, id, json),
        ContactCommands::Add(args) => add(app, args, json),
        ContactCommands::Update(args) => update(app, args, json),
        ContactCommands::Delete { id } => delete(app, id, json),
    }
}

fn list(app: &App, args: &ContactListArgs, json: bool) -> Result<()> {
    app.require(Route::Contacts)?;

    let filter = ContactFilter {
        kind: args.kind.as_deref().map(validate::contact_kind).transpose()?,
        status: args.status.as_deref().map(validate::contact_status).transpose()?,
        search: args.search.clone(),
    };
    let all = app.contacts.list();
    let contacts = filter.apply(&all);

    if json {
        return super::print_json(&ContactListOutput {
            count: contacts.len(),
            stats: app.contacts.stats(),
            contacts,
        });
    }

    if contacts.is_empty() {
        println!("No contacts found.");
        return Ok(());
    }

    println!("Contacts ({} found):", contacts.len());
    println!();
    for c in &contacts {
        let status = match c.status {
            ContactStatus::Active | ContactStatus::Qualified => c.status.as_str().green(),
            ContactStatus::Inactive => c.status.as_str().dimmed(),
            _ => c.status.as_str().yellow(),
        };
        println!(
            "[{}] {} <{}> {} ({}, {})",
            c.id,
            c.full_name().bold(),
            c.email,
            c.company,
            c.kind.as_str(),
            status
        );
    }
    Ok(())
}

fn show(app: &App, id: &str, json: bool) -> Result<()> {
    app.require(Route::Contact(id.to_string()))?;

    let contact = app
        .contacts
        .find(id)
        .ok_or_else(|| Error::ContactNotFound { id: id.to_string() })?;
    let tasks = app.tasks.by_contact(contact.id);

    if json {
        return super::print_json(&ContactShowOutput { contact, tasks });
    }

    println!("{} {}", contact.full_name().bold(), format!("[{}]", contact.id).dimmed());
    println!("  Email:        {}", contact.email);
    if !contact.phone.is_empty() {
        println!("  Phone:        {}", contact.phone);
    }
    println!("  Company:      {}", contact.company);
    if !contact.position.is_empty() {
        println!("  Position:     {}", contact.position);
    }
    println!("  Type:         {}", contact.kind.as_str());
    println!("  Status:       {}", contact.status.as_str());
    if !contact.assigned_to.is_empty() {
        println!("  Assigned to:  {}", contact.assigned_to);
    }
    if !contact.tags.is_empty() {
        println!("  Tags:         {}", contact.tags.join(", "));
    }
    println!("  Created:      {}", contact.created_at);
    println!("  Last contact: {}", contact.last_contact);
    if !contact.notes.is_empty() {
        println!("  Notes:        {}", contact.notes);
    }
    if !tasks.is_empty() {
        println!();
        println!("Tasks ({}):", tasks.len());
        for t in &tasks {
            println!("  [{}] {} ({})", t.id, t.title, t.status.as_str());
        }
    }
    Ok(())
}

fn add(app: &mut App, args: &ContactAddArgs, json: bool) -> Result<()> {
    app.require(Route::AddContact)?;

    let mut new = NewContact::new(&args.first_name, &args.last_name, &args.email, &args.company)
        .with_kind(validate::contact_kind(&args.kind)?)
        .with_status(validate::contact_status(&args.status)?)
        .with_phone(&args.phone)
        .with_assignee(&args.assigned_to)
        .with_tags(clean_tags(&args.tags));
    new.position.clone_from(&args.position);
    new.source.clone_from(&args.source);
    new.notes.clone_from(&args.notes);
    validate::new_contact(&new)?;

    app.simulate_latency();
    let contact = app.contacts.add(new);
    print_mutation("Added", &contact, json)
}

fn update(app: &mut App, args: &ContactUpdateArgs, json: bool) -> Result<()> {
    app.require(Route::Contact(args.id.clone()))?;
    let id = contact_id(&args.id)?;

    let patch = ContactPatch {
        first_name: args.first_name.clone(),
        last_name: args.last_name.clone(),
        email: args.email.clone(),
        phone: args.phone.clone(),
        company: args.company.clone(),
        position: args.position.clone(),
        kind: args.kind.as_deref().map(validate::contact_kind).transpose()?,
        status: args.status.as_deref().map(validate::contact_status).transpose()?,
        source: args.source.clone(),
        assigned_to: args.assigned_to.clone(),
        tags: args.tags.as_deref().map(clean_tags),
        notes: args.notes.clone(),
        last_contact: args
            .last_contact
            .as_deref()
            .map(|d| super::parse_date("last contact date", d))
            .transpose()?,
    };
    validate::contact_patch(&patch)?;

    app.simulate_latency();
    let contact = app.contacts.update(id, patch)?;
    print_mutation("Updated", &contact, json)
}

fn delete(app: &mut App, id: &str, json: bool) -> Result<()> {
    app.require(Route::Contact(id.to_string()))?;
    let key = contact_id(id)?;

    let removed = app
        .contacts
        .remove(key)
        .ok_or_else(|| Error::ContactNotFound { id: id.to_string() })?;
    print_mutation("Deleted", &removed, json)
}

fn print_mutation(verb: &str, contact: &Contact, json: bool) -> Result<()> {
    if crate::is_silent() {
        println!("{}", contact.id);
        return Ok(());
    }
    if json {
        return super::print_json(contact);
    }
    println!(
        "{} contact {}: {}",
        verb,
        contact.id,
        contact.full_name().bold()
    );
    Ok(())
}

fn contact_id(raw: &str) -> Result<ContactId> {
    parse_numeric_id(raw).ok_or_else(|| Error::ContactNotFound { id: raw.to_string() })
}

pub(super) fn clean_tags(tags: &[String]) -> Vec<String> {
    tags.iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(ToString::to_string)
        .collect()
}
