//! CLI command implementations.

use crate::client::ServiceClient;
use crate::colors;
use crate::exit_codes::ExitCode;
use signbridge_common::ipc::{Request, Response};

/// Connect (spawning the service if needed) or report failure.
async fn connected_client(quiet: bool) -> Result<ServiceClient, ExitCode> {
    let client = ServiceClient::new();
    if let Err(e) = client.connect_or_spawn().await {
        if !quiet {
            eprintln!("{}", colors::error(&e.to_string()));
        }
        return Err(e.to_exit_code());
    }
    Ok(client)
}

fn unexpected(response: Response, quiet: bool) -> ExitCode {
    if !quiet {
        eprintln!(
            "{}",
            colors::error(&format!("Unexpected response: {:?}", response))
        );
    }
    ExitCode::GeneralError
}

/// List vocabulary words.
pub async fn words(json: bool, quiet: bool) -> ExitCode {
    let client = match connected_client(quiet).await {
        Ok(c) => c,
        Err(code) => return code,
    };

    match client.request(Request::ListWords).await {
        Ok(Response::Words { words }) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&words).unwrap());
            } else if words.is_empty() {
                if !quiet {
                    println!("{}", colors::dim("No words in the dataset."));
                }
            } else {
                for word in words {
                    println!("{}", word);
                }
            }
            ExitCode::Success
        }
        Ok(other) => unexpected(other, quiet),
        Err(e) => {
            if !quiet {
                eprintln!("{}", colors::error(&e.to_string()));
            }
            e.to_exit_code()
        }
    }
}

/// Show the full word -> clip dictionary.
pub async fn dictionary(json: bool, quiet: bool) -> ExitCode {
    let client = match connected_client(quiet).await {
        Ok(c) => c,
        Err(code) => return code,
    };

    match client.request(Request::GetDictionary).await {
        Ok(Response::Dictionary { entries }) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&entries).unwrap());
            } else if entries.is_empty() {
                if !quiet {
                    println!("{}", colors::dim("No clips in the dataset."));
                }
            } else {
                let word_width = entries
                    .iter()
                    .map(|e| e.word.len())
                    .max()
                    .unwrap_or(4)
                    .max(4);

                println!(
                    "{}  {}",
                    colors::pad_left("WORD", word_width, colors::header),
                    colors::header("CLIP")
                );
                println!("{}  {}", "-".repeat(word_width), "-".repeat(4));

                for entry in entries {
                    println!(
                        "{}  {}",
                        colors::pad_left(&entry.word, word_width, colors::matched),
                        colors::path(&entry.video_path)
                    );
                }
            }
            ExitCode::Success
        }
        Ok(other) => unexpected(other, quiet),
        Err(e) => {
            if !quiet {
                eprintln!("{}", colors::error(&e.to_string()));
            }
            e.to_exit_code()
        }
    }
}

/// Normalize a text.
pub async fn normalize(text: &str, json: bool, quiet: bool) -> ExitCode {
    let client = match connected_client(quiet).await {
        Ok(c) => c,
        Err(code) => return code,
    };

    match client
        .request(Request::NormalizeText {
            text: text.to_string(),
        })
        .await
    {
        Ok(Response::Normalized { text }) => {
            if json {
                println!("{}", serde_json::json!({ "normalized": text }));
            } else {
                println!("{}", text);
            }
            ExitCode::Success
        }
        Ok(other) => unexpected(other, quiet),
        Err(e) => {
            if !quiet {
                eprintln!("{}", colors::error(&e.to_string()));
            }
            e.to_exit_code()
        }
    }
}

/// Resolve a text against the dictionary.
pub async fn lookup(text: &str, json: bool, quiet: bool) -> ExitCode {
    let client = match connected_client(quiet).await {
        Ok(c) => c,
        Err(code) => return code,
    };

    match client
        .request(Request::LookupSigns {
            text: text.to_string(),
        })
        .await
    {
        Ok(Response::Lookup(lookup)) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&lookup).unwrap());
                return ExitCode::Success;
            }

            if !quiet {
                println!("{} {}", colors::dim("normalized:"), lookup.normalized);
            }

            if lookup.matched.is_empty() {
                if !quiet {
                    println!("{}", colors::dim("No clips matched."));
                }
            } else {
                for entry in &lookup.matched {
                    println!(
                        "{}  {}",
                        colors::matched(&entry.word),
                        colors::path(&entry.video_path)
                    );
                }
            }

            if !lookup.missing.is_empty() && !quiet {
                println!(
                    "{} {}",
                    colors::dim("missing:"),
                    colors::missing(&lookup.missing.join(" "))
                );
            }
            ExitCode::Success
        }
        Ok(other) => unexpected(other, quiet),
        Err(e) => {
            if !quiet {
                eprintln!("{}", colors::error(&e.to_string()));
            }
            e.to_exit_code()
        }
    }
}

/// Print a published viewer page to stdout.
pub async fn page(filename: &str, quiet: bool) -> ExitCode {
    let client = match connected_client(quiet).await {
        Ok(c) => c,
        Err(code) => return code,
    };

    match client
        .request(Request::GetPublishedPage {
            filename: filename.to_string(),
        })
        .await
    {
        Ok(Response::Page { html }) => {
            print!("{}", html);
            ExitCode::Success
        }
        Ok(other) => unexpected(other, quiet),
        Err(e) => {
            if !quiet {
                eprintln!("{}", colors::error(&e.to_string()));
            }
            e.to_exit_code()
        }
    }
}

/// Delete all generated videos and published pages.
pub async fn clean(json: bool, quiet: bool) -> ExitCode {
    let client = match connected_client(quiet).await {
        Ok(c) => c,
        Err(code) => return code,
    };

    match client.request(Request::DeleteGeneratedMedia).await {
        Ok(Response::MediaDeleted {
            generated,
            published,
        }) => {
            if json {
                println!(
                    "{}",
                    serde_json::json!({ "generated": generated, "published": published })
                );
            } else if !quiet {
                println!(
                    "{}",
                    colors::success(&format!(
                        "Deleted {} generated videos, {} published pages",
                        generated, published
                    ))
                );
            }
            ExitCode::Success
        }
        Ok(other) => unexpected(other, quiet),
        Err(e) => {
            if !quiet {
                eprintln!("{}", colors::error(&e.to_string()));
            }
            e.to_exit_code()
        }
    }
}

/// Show the current directory configuration.
pub async fn config_show(json: bool, quiet: bool) -> ExitCode {
    let client = match connected_client(quiet).await {
        Ok(c) => c,
        Err(code) => return code,
    };

    match client.request(Request::GetConfig).await {
        Ok(Response::Config(config)) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&config).unwrap());
            } else {
                println!("{}  {}", colors::dim("dataset:  "), colors::path(&config.dataset_dir));
                println!("{}  {}", colors::dim("generated:"), colors::path(&config.generated_dir));
                println!("{}  {}", colors::dim("published:"), colors::path(&config.published_dir));
            }
            ExitCode::Success
        }
        Ok(other) => unexpected(other, quiet),
        Err(e) => {
            if !quiet {
                eprintln!("{}", colors::error(&e.to_string()));
            }
            e.to_exit_code()
        }
    }
}

/// Point the service at a different dataset root.
pub async fn config_set_dataset(path: &str, quiet: bool) -> ExitCode {
    let client = match connected_client(quiet).await {
        Ok(c) => c,
        Err(code) => return code,
    };

    // Expand tilde paths before they reach the service
    let expanded = shellexpand::tilde(path).into_owned();

    match client
        .request(Request::SetDatasetDir { path: expanded })
        .await
    {
        Ok(Response::Ok) => {
            if !quiet {
                println!("{}", colors::success("Dataset root updated"));
            }
            ExitCode::Success
        }
        Ok(other) => unexpected(other, quiet),
        Err(e) => {
            if !quiet {
                eprintln!("{}", colors::error(&e.to_string()));
            }
            e.to_exit_code()
        }
    }
}

/// Show service status.
pub async fn status(json: bool, quiet: bool) -> ExitCode {
    let client = match connected_client(quiet).await {
        Ok(c) => c,
        Err(code) => return code,
    };

    match client.request(Request::GetStatus).await {
        Ok(Response::Status(status)) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&status).unwrap());
            } else {
                println!("{} {}", colors::dim("dataset:   "), colors::path(&status.dataset_dir));
                println!("{} {}", colors::dim("words:     "), status.word_count);
                println!("{} {}", colors::dim("started at:"), status.started_at);
            }
            ExitCode::Success
        }
        Ok(other) => unexpected(other, quiet),
        Err(e) => {
            if !quiet {
                eprintln!("{}", colors::error(&e.to_string()));
            }
            e.to_exit_code()
        }
    }
}

/// Check that the service is reachable.
pub async fn ping(quiet: bool) -> ExitCode {
    let client = ServiceClient::new();

    if let Err(e) = client.connect().await {
        if !quiet {
            eprintln!("{}", colors::error(&e.to_string()));
        }
        return e.to_exit_code();
    }

    match client.request(Request::Ping).await {
        Ok(Response::Pong) => {
            if !quiet {
                println!("{}", colors::success("Service is running"));
            }
            ExitCode::Success
        }
        Ok(other) => unexpected(other, quiet),
        Err(e) => {
            if !quiet {
                eprintln!("{}", colors::error(&e.to_string()));
            }
            e.to_exit_code()
        }
    }
}

/// Ask the service to shut down.
pub async fn shutdown(quiet: bool) -> ExitCode {
    let client = ServiceClient::new();

    if let Err(e) = client.connect().await {
        if !quiet {
            eprintln!("{}", colors::error(&e.to_string()));
        }
        return e.to_exit_code();
    }

    match client.request(Request::Shutdown).await {
        Ok(Response::Ok) => {
            if !quiet {
                println!("{}", colors::success("Shutdown requested"));
            }
            ExitCode::Success
        }
        Ok(other) => unexpected(other, quiet),
        Err(e) => {
            if !quiet {
                eprintln!("{}", colors::error(&e.to_string()));
            }
            e.to_exit_code()
        }
    }
}
