//! Opportunity command implementations.

use colored::Colorize;
use serde::Serialize;

use crate::app::App;
use crate::cli::{OpportunityAddArgs, OpportunityCommands, OpportunityUpdateArgs};
use crate::error::{Error, Result};
use crate::model::{NewOpportunity, Opportunity, OpportunityPatch, Stage};
use crate::nav::Route;
use crate::query::{OpportunityFilter, PipelineStats};
use crate::validate;

use super::contact::clean_tags;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OpportunityListOutput<'a> {
    opportunities: Vec<&'a Opportunity>,
    count: usize,
    total_value: f64,
}

/// Execute opportunity commands.
///
/// # Errors
///
/// Returns an error if the route is gated, input is invalid, the deal does
/// not exist, or the pipeline cannot be persisted.
pub fn execute(app: &mut App, command: &OpportunityCommands, json: bool) -> Result<()> {
    match command {
        OpportunityCommands::List { stage, search } => {
            list(app, stage.as_deref(), search.clone(), json)
        }
        OpportunityCommands::Show { id } => show(app, id, json),
        OpportunityCommands::Add(args) => add(app, args, json),
        OpportunityCommands::Update(args) => update(app, args, json),
        OpportunityCommands::Delete { id } => delete(app, id, json),
        OpportunityCommands::Pipeline => pipeline(app, json),
    }
}

fn list(app: &App, stage: Option<&str>, search: Option<String>, json: bool) -> Result<()> {
    app.require(Route::Opportunities)?;

    let filter = OpportunityFilter {
        stage: stage.map(validate::stage).transpose()?,
        search,
    };
    let all = app.opportunities.list();
    let opportunities = filter.apply(&all);
    let total_value: f64 = opportunities.iter().map(|o| o.value).sum();

    if json {
        return super::print_json(&OpportunityListOutput {
            count: opportunities.len(),
            total_value,
            opportunities,
        });
    }

    if opportunities.is_empty() {
        println!("No opportunities found.");
        return Ok(());
    }

    println!(
        "Opportunities ({} found, {}):",
        opportunities.len(),
        super::money(total_value)
    );
    println!();
    for o in &opportunities {
        println!(
            "[{}] {} - {} {} ({}, {}%, closes {})",
            o.id,
            o.name.bold(),
            o.client,
            super::money(o.value).green(),
            stage_label(o.stage),
            o.probability,
            o.expected_close_date
        );
    }
    Ok(())
}

fn show(app: &App, id: &str, json: bool) -> Result<()> {
    app.require(Route::Opportunity(id.to_string()))?;

    let opp = app
        .opportunities
        .get_by_id(id)
        .ok_or_else(|| Error::OpportunityNotFound { id: id.to_string() })?;

    if json {
        return super::print_json(&opp);
    }

    println!("{} {}", opp.name.bold(), format!("[{}]", opp.id).dimmed());
    println!("  Client:       {}", opp.client);
    println!("  Value:        {}", super::money(opp.value));
    println!("  Weighted:     {}", super::money(opp.weighted_value()));
    println!("  Stage:        {}", stage_label(opp.stage));
    println!("  Probability:  {}%", opp.probability);
    println!("  Close date:   {}", opp.expected_close_date);
    if !opp.owner.is_empty() {
        println!("  Owner:        {}", opp.owner);
    }
    if !opp.source.is_empty() {
        println!("  Source:       {}", opp.source);
    }
    if !opp.description.is_empty() {
        println!("  Description:  {}", opp.description);
    }
    if !opp.tags.is_empty() {
        println!("  Tags:         {}", opp.tags.join(", "));
    }
    println!("  Created:      {}", opp.created_at);
    println!("  Updated:      {}", opp.last_updated);
    Ok(())
}

fn add(app: &mut App, args: &OpportunityAddArgs, json: bool) -> Result<()> {
    app.require(Route::AddOpportunity)?;

    let close = super::parse_date("expected close date", &args.close_date)?;
    let mut new = NewOpportunity::new(&args.name, &args.client, args.value, close)
        .with_stage(validate::stage(&args.stage)?)
        .with_probability(args.probability)
        .with_owner(&args.owner)
        .with_tags(clean_tags(&args.tags));
    new.source.clone_from(&args.source);
    new.description.clone_from(&args.description);
    validate::new_opportunity(&new)?;

    app.simulate_latency();
    let opp = app.opportunities.add(new)?;
    print_mutation("Added", &opp, json)
}

fn update(app: &mut App, args: &OpportunityUpdateArgs, json: bool) -> Result<()> {
    app.require(Route::Opportunity(args.id.clone()))?;

    let patch = OpportunityPatch {
        name: args.name.clone(),
        client: args.client.clone(),
        value: args.value,
        stage: args.stage.as_deref().map(validate::stage).transpose()?,
        probability: args.probability,
        expected_close_date: args
            .close_date
            .as_deref()
            .map(|d| super::parse_date("expected close date", d))
            .transpose()?,
        owner: args.owner.clone(),
        source: args.source.clone(),
        description: args.description.clone(),
        tags: args.tags.as_deref().map(clean_tags),
    };
    validate::opportunity_patch(&patch)?;

    app.simulate_latency();
    let opp = app.opportunities.update(&args.id, patch)?;
    print_mutation("Updated", &opp, json)
}

fn delete(app: &mut App, id: &str, json: bool) -> Result<()> {
    app.require(Route::Opportunity(id.to_string()))?;

    let removed = app
        .opportunities
        .remove(id)?
        .ok_or_else(|| Error::OpportunityNotFound { id: id.to_string() })?;
    print_mutation("Deleted", &removed, json)
}

fn pipeline(app: &App, json: bool) -> Result<()> {
    app.require(Route::Opportunities)?;
    let stats: PipelineStats = app.opportunities.pipeline_stats();

    if json {
        return super::print_json(&stats);
    }

    println!("{}", "Sales pipeline".cyan().bold());
    println!();
    for stage in Stage::ALL {
        let summary = stats.stage(stage);
        println!(
            "  {:<14} {:>3}  {:>14}",
            stage_label(stage),
            summary.count,
            super::money(summary.value)
        );
    }
    println!();
    println!(
        "  {:<14} {:>3}  {:>14}",
        "Total",
        stats.total,
        super::money(stats.total_value)
    );
    println!("  {:<14}      {:>14}", "Weighted", super::money(stats.weighted_value));
    println!("  Won {} / Lost {}", stats.won, stats.lost);
    Ok(())
}

fn print_mutation(verb: &str, opp: &Opportunity, json: bool) -> Result<()> {
    if crate::is_silent() {
        println!("{}", opp.id);
        return Ok(());
    }
    if json {
        return super::print_json(opp);
    }
    println!("{verb} opportunity {}: {}", opp.id, opp.name.bold());
    Ok(())
}

fn stage_label(stage: Stage) -> &'static str {
    match stage {
        Stage::Prospecting => "Prospecting",
        Stage::Qualification => "Qualification",
        Stage::Proposal => "Proposal",
        Stage::Negotiation => "Negotiation",
        Stage::ClosedWon => "Closed Won",
        Stage::ClosedLost => "Closed Lost",
    }
}
