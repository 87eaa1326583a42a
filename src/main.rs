use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use property_lead::drafts::{DraftFilter, DraftQuery, DraftStore, EditHandoff, SortOrder};
use property_lead::form::{FieldPath, FormState, TEMPLATE_NAMES};
use property_lead::models::{Draft, DraftId, AMENITY_OPTIONS};
use property_lead::storage::{FileStorage, KeyValueStorage};
use property_lead::{Config, LeadClient};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "property-lead", about = "Post a property, manage saved drafts")]
struct Cli {
    #[command(flatten)]
    config: Config,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List auto-fill templates and amenity options
    Templates,
    /// Fill in a new listing, then save it as a draft or submit it
    New(FormArgs),
    /// Show saved drafts
    List {
        /// Match location, contact name or description
        #[arg(long, default_value = "")]
        search: String,
        /// all, sell, rent, residential or commercial
        #[arg(long, default_value_t = DraftFilter::All)]
        filter: DraftFilter,
        /// newest, oldest, price-high or price-low
        #[arg(long, default_value_t = SortOrder::Newest)]
        sort: SortOrder,
        #[arg(long)]
        json: bool,
    },
    /// Print one draft as JSON
    Show { id: String },
    /// Stage a draft to be picked up by `resume`
    Edit { id: String },
    /// Continue the staged draft (or a blank form if none is staged)
    Resume(FormArgs),
    /// Delete one draft
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Delete every draft
    Clear {
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args, Debug)]
struct FormArgs {
    /// Start from a named template
    #[arg(long)]
    template: Option<String>,
    /// Set a field, e.g. `propertyDetails.expectedPrice=5000000`
    #[arg(long = "set", value_parser = parse_assignment)]
    fields: Vec<(FieldPath, String)>,
    /// Toggle an amenity (repeatable)
    #[arg(long = "amenity")]
    amenities: Vec<String>,
    /// Save the listing as a draft
    #[arg(long, conflicts_with = "submit")]
    save: bool,
    /// Send the listing to the lead service
    #[arg(long)]
    submit: bool,
}

fn parse_assignment(raw: &str) -> Result<(FieldPath, String), String> {
    let (path, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected PATH=VALUE, got `{raw}`"))?;
    let path = path.trim().parse::<FieldPath>().map_err(|e| e.to_string())?;
    Ok((path, value.to_string()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(cli.config.env_filter())
        .init();

    let storage = FileStorage::open(&cli.config.data_dir)
        .with_context(|| format!("Failed to open data dir {}", cli.config.data_dir.display()))?;
    let store = DraftStore::new(&storage);
    let handoff = EditHandoff::new(&storage);

    match cli.command {
        Command::Templates => {
            println!("Templates:");
            for name in TEMPLATE_NAMES {
                println!("  {}", name);
            }
            println!("Amenities:");
            for amenity in AMENITY_OPTIONS {
                println!("  {}", amenity);
            }
        }
        Command::New(args) => {
            run_form(FormState::new(), args, &store, &cli.config).await?;
        }
        Command::Resume(args) => {
            let form = match handoff.take().context("Failed to read staged draft")? {
                Some(draft) => {
                    info!("Resuming draft {}", draft.id);
                    FormState::from_draft(draft)
                }
                None => {
                    info!("No staged draft, starting a blank form");
                    FormState::new()
                }
            };
            run_form(form, args, &store, &cli.config).await?;
        }
        Command::List {
            search,
            filter,
            sort,
            json,
        } => {
            let drafts = store.list();
            let query = DraftQuery {
                search,
                filter,
                sort,
            };
            let visible = query.apply(&drafts);

            if json {
                println!("{}", serde_json::to_string_pretty(&visible)?);
            } else {
                print_drafts(&visible, drafts.len());
            }
        }
        Command::Show { id } => {
            let draft = find_draft(&store, &id)?;
            println!("{}", serde_json::to_string_pretty(&draft)?);
        }
        Command::Edit { id } => {
            let draft = find_draft(&store, &id)?;
            handoff.stage(&draft).context("Failed to stage draft")?;
            info!("Draft {} staged, run `property-lead resume` to continue", draft.id);
        }
        Command::Delete { id, yes } => {
            let id = DraftId::from(id);
            match delete_confirmed(&store, &id, yes, io::stdin().lock(), io::stdout())? {
                Removal::Done => info!("Draft deleted successfully"),
                Removal::NotFound => warn!("No draft with id {}", id),
                Removal::Declined => {}
            }
        }
        Command::Clear { yes } => {
            if clear_confirmed(&store, yes, io::stdin().lock(), io::stdout())? == Removal::Done {
                info!("All drafts deleted successfully");
            }
        }
    }

    Ok(())
}

async fn run_form(
    mut form: FormState,
    args: FormArgs,
    store: &DraftStore<&FileStorage>,
    config: &Config,
) -> Result<()> {
    if let Some(name) = &args.template {
        if !form.apply_template(name) {
            bail!("Unknown template `{}` (see `property-lead templates`)", name);
        }
    }
    for (path, value) in &args.fields {
        form.set_field(*path, value)?;
    }
    for amenity in &args.amenities {
        if !AMENITY_OPTIONS.contains(&amenity.as_str()) {
            warn!("`{}` is not one of the offered amenities", amenity);
        }
        form.toggle_amenity(amenity);
    }

    if args.save {
        let draft = form.save_draft(store)?;
        println!("Saved draft {}", draft.id);
    } else if args.submit {
        let client = LeadClient::with_timeout(&config.base_url, config.timeout())?;
        form.submit(&client)
            .await
            .context("Failed to submit property listing (rerun with --save to keep it as a draft)")?;
        println!("Property listed successfully!");
    } else {
        println!("{}", serde_json::to_string_pretty(form.listing())?);
    }
    Ok(())
}

fn find_draft(store: &DraftStore<&FileStorage>, id: &str) -> Result<Draft> {
    store
        .get(&DraftId::from(id))
        .with_context(|| format!("No draft with id {}", id))
}

/// Outcome of a confirmed destructive command
#[derive(Debug, PartialEq, Eq)]
enum Removal {
    Done,
    NotFound,
    Declined,
}

/// Ask a yes/no question; anything but an explicit yes (including EOF) is a no
fn confirm(prompt: &str, mut input: impl BufRead, mut output: impl Write) -> io::Result<bool> {
    write!(output, "{} [y/N] ", prompt)?;
    output.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

fn delete_confirmed<S: KeyValueStorage>(
    store: &DraftStore<S>,
    id: &DraftId,
    yes: bool,
    input: impl BufRead,
    output: impl Write,
) -> Result<Removal> {
    if !yes && !confirm("Are you sure you want to delete this draft?", input, output)? {
        return Ok(Removal::Declined);
    }
    Ok(if store.delete(id)? {
        Removal::Done
    } else {
        Removal::NotFound
    })
}

fn clear_confirmed<S: KeyValueStorage>(
    store: &DraftStore<S>,
    yes: bool,
    input: impl BufRead,
    output: impl Write,
) -> Result<Removal> {
    let prompt = "Are you sure you want to delete all drafts? This action cannot be undone.";
    if !yes && !confirm(prompt, input, output)? {
        return Ok(Removal::Declined);
    }
    store.clear()?;
    Ok(Removal::Done)
}

fn print_drafts(drafts: &[Draft], total: usize) {
    println!("\n📋 Showing {} of {} drafts\n", drafts.len(), total);

    for (i, draft) in drafts.iter().enumerate() {
        let data = &draft.data;
        let details = &data.property_details;
        let price = if details.expected_price.is_empty() {
            "no price".to_string()
        } else {
            format!("₹{}", details.expected_price)
        };
        println!("{}. {} ({})", i + 1, data.property_type.display_text(), price);
        if !details.location.is_empty() {
            println!("   Location: {}", details.location);
        }
        if !details.property_size.is_empty() {
            println!("   Size: {} {}", details.property_size, details.unit.label());
        }
        if !data.contact_details.name.is_empty() {
            println!("   Contact: {}", data.contact_details.name);
        }
        if !data.additional_details.amenities.is_empty() {
            println!("   Amenities: {}", data.additional_details.amenities.join(", "));
        }
        println!("   Saved: {}", draft.created_at.format("%b %d, %Y %I:%M %p"));
        println!("   ID: {}", draft.id);
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use property_lead::drafts::store::DRAFTS_KEY;
    use property_lead::storage::MemoryStorage;
    use property_lead::PropertyListing;

    fn store_with_one_draft() -> (DraftStore<MemoryStorage>, DraftId) {
        let store = DraftStore::new(MemoryStorage::new());
        let draft = store.create(PropertyListing::default()).unwrap();
        (store, draft.id)
    }

    fn stored(store: &DraftStore<MemoryStorage>) -> Option<String> {
        store.storage().get(DRAFTS_KEY).unwrap()
    }

    #[test]
    fn declined_delete_leaves_drafts_untouched() {
        for answer in ["n\n", "\n", "", "maybe\n"] {
            let (store, id) = store_with_one_draft();
            let before = stored(&store);
            let mut prompt = Vec::new();

            let outcome = delete_confirmed(&store, &id, false, answer.as_bytes(), &mut prompt).unwrap();

            assert_eq!(outcome, Removal::Declined, "{answer:?}");
            assert_eq!(stored(&store), before);
            assert!(String::from_utf8(prompt).unwrap().contains("[y/N]"));
        }
    }

    #[test]
    fn confirmed_delete_removes_the_draft() {
        let (store, id) = store_with_one_draft();

        let outcome = delete_confirmed(&store, &id, false, "y\n".as_bytes(), io::sink()).unwrap();
        assert_eq!(outcome, Removal::Done);
        assert!(store.list().is_empty());

        let outcome = delete_confirmed(&store, &id, true, io::empty(), io::sink()).unwrap();
        assert_eq!(outcome, Removal::NotFound);
    }

    #[test]
    fn clear_needs_confirmation_unless_yes() {
        let (store, _) = store_with_one_draft();
        let before = stored(&store);

        let outcome = clear_confirmed(&store, false, "N\n".as_bytes(), io::sink()).unwrap();
        assert_eq!(outcome, Removal::Declined);
        assert_eq!(stored(&store), before);

        let outcome = clear_confirmed(&store, true, io::empty(), io::sink()).unwrap();
        assert_eq!(outcome, Removal::Done);
        assert!(store.list().is_empty());
    }
}
