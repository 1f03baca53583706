//! movies-client CLI entry point.

use clap::Parser;
use movies_client::cli::{Cli, Commands, OutputFormat};
use movies_client::client::MoviesClient;
use movies_client::error::ClientError;
use movies_client::output::{format_output, pretty};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = MoviesClient::new(&cli.base_url);

    match cli.command {
        Commands::Table(table_cmd) => {
            use movies_client::cli::tables::TableAction;
            match table_cmd.action {
                TableAction::Create => {
                    let output = client.create_table().await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&output, cli.format)),
                        OutputFormat::Pretty => {
                            println!("Created:\n{}", pretty::format_table(&output.table_description))
                        }
                    }
                }
                TableAction::LoadSampleData => {
                    let report = client.load_sample_data().await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&report, cli.format)),
                        OutputFormat::Pretty => println!("{}", pretty::format_report(&report)),
                    }
                }
            }
        }
        Commands::Items(items_cmd) => {
            use movies_client::cli::items::ItemsAction;
            match items_cmd.action {
                ItemsAction::Create { year, title, info } => {
                    let info: serde_json::Value = serde_json::from_str(&info)
                        .map_err(|e| ClientError::InvalidInput(format!("--info: {e}")))?;
                    let output = client.create_item(year, &title, info).await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&output, cli.format)),
                        OutputFormat::Pretty => println!("Created {title} ({year})"),
                    }
                }
                ItemsAction::Get { year, title } => {
                    let output = client.get_item(year, &title).await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&output, cli.format)),
                        OutputFormat::Pretty => match &output.item {
                            Some(item) => println!("{}", pretty::format_item(item)),
                            None => println!("No movie {title} ({year})."),
                        },
                    }
                }
                ItemsAction::Update {
                    year,
                    title,
                    rating,
                    plot,
                    actors,
                } => {
                    let output = client
                        .update_item(year, &title, rating.into(), &plot, &actors)
                        .await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&output, cli.format)),
                        OutputFormat::Pretty => println!(
                            "Updated:\n{}",
                            pretty::format_attributes(output.attributes.as_ref())
                        ),
                    }
                }
                ItemsAction::IncrementRating { year, title } => {
                    let output = client.increment_rating(year, &title).await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&output, cli.format)),
                        OutputFormat::Pretty => println!(
                            "Updated:\n{}",
                            pretty::format_attributes(output.attributes.as_ref())
                        ),
                    }
                }
                ItemsAction::RemoveFirstActor { year, title } => {
                    let output = client.update_item_conditionally(year, &title).await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&output, cli.format)),
                        OutputFormat::Pretty => println!(
                            "Updated:\n{}",
                            pretty::format_attributes(output.attributes.as_ref())
                        ),
                    }
                }
                ItemsAction::Delete { year, title } => {
                    let output = client.delete_item(year, &title).await?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&output, cli.format)),
                        OutputFormat::Pretty => println!("Deleted {title} ({year})"),
                    }
                }
            }
        }
        Commands::Query(query_cmd) => {
            use movies_client::cli::queries::QueryAction;
            let output = match query_cmd.action {
                QueryAction::ByYear { year } => client.query_by_year(year).await?,
                QueryAction::ByYearAndTitle {
                    year,
                    letter1,
                    letter2,
                } => {
                    client
                        .query_by_year_and_title(year, &letter1, &letter2)
                        .await?
                }
                QueryAction::Scan { start_yr, end_yr } => {
                    client.scan_movies(start_yr, end_yr).await?
                }
            };
            match cli.format {
                OutputFormat::Json => println!("{}", format_output(&output, cli.format)),
                OutputFormat::Pretty => println!("{}", pretty::format_items(&output)),
            }
        }
        Commands::Health(health_cmd) => {
            use movies_client::cli::health::HealthAction;
            match health_cmd.action {
                HealthAction::Live => {
                    let live = client.livez().await?;
                    println!("{}", if live { "live" } else { "not live" });
                }
                HealthAction::Ready => {
                    let readiness = client.readyz().await?;
                    match cli.format {
                        OutputFormat::Json => {
                            println!("{}", format_output(&readiness, cli.format))
                        }
                        OutputFormat::Pretty => match &readiness.error {
                            Some(error) => println!("Not ready: {error}"),
                            None => println!("Ready"),
                        },
                    }
                }
            }
        }
    }

    Ok(())
}
