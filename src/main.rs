use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use product_forms::{
    config::FormsConfig,
    context::{FormContext, Session},
    forms::{CreateProductForm, EditProductForm, FormState, Navigation, SubmitError},
    models::{image::ImageFile, product::ProductField},
};
use strum::IntoEnumIterator;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage:
  product-forms create <draft.json> <image>
  product-forms edit <product-id> <draft.json> [image]";

enum Command {
    Create {
        draft: PathBuf,
        image: PathBuf,
    },
    Edit {
        product_id: String,
        draft: PathBuf,
        image: Option<PathBuf>,
    },
}

fn parse_args(args: &[String]) -> Option<Command> {
    match args {
        [cmd, draft, image] if cmd == "create" => Some(Command::Create {
            draft: draft.into(),
            image: image.into(),
        }),
        [cmd, product_id, draft, rest @ ..] if cmd == "edit" && rest.len() <= 1 => {
            Some(Command::Edit {
                product_id: product_id.clone(),
                draft: draft.into(),
                image: rest.first().map(PathBuf::from),
            })
        }
        _ => None,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = parse_args(&args) else {
        eprintln!("{}", USAGE);
        return ExitCode::from(2);
    };

    // Load configuration from environment
    let config = match FormsConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration from environment: {}", e);
            return ExitCode::from(2);
        }
    };

    let context = match build_context(&config) {
        Ok(context) => context,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::from(2);
        }
    };

    tracing::info!(api = %config.api_base_url, "Starting product form shell");

    let outcome = match command {
        Command::Create { draft, image } => run_create(context, &draft, &image).await,
        Command::Edit {
            product_id,
            draft,
            image,
        } => run_edit(context, product_id, &draft, image.as_deref()).await,
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{}", message);
            ExitCode::FAILURE
        }
    }
}

fn build_context(config: &FormsConfig) -> Result<FormContext, String> {
    let Some(seller_id) = config.seller_id.clone() else {
        return Err("SELLER_ID must be set".to_string());
    };
    FormContext::from_config(config, Session::new(seller_id))
        .map_err(|e| format!("Failed to initialize product backend client: {}", e))
}

async fn run_create(context: FormContext, draft: &Path, image: &Path) -> Result<(), String> {
    let input = read_draft(draft)?;
    let mut screen = CreateProductForm::mount(context)
        .await
        .map_err(|e| e.to_string())?;

    apply_draft(screen.form_mut(), &input);
    select_image(screen.form_mut(), Some(image))?;

    let result = screen.submit().await;
    report(screen.form(), result)
}

async fn run_edit(
    context: FormContext,
    product_id: String,
    draft: &Path,
    image: Option<&Path>,
) -> Result<(), String> {
    let input = read_draft(draft)?;
    let mut screen = EditProductForm::mount(context, product_id)
        .await
        .map_err(|e| e.to_string())?;

    apply_draft(screen.form_mut(), &input);
    select_image(screen.form_mut(), image)?;

    let result = screen.submit().await;
    report(screen.form(), result)
}

/// Draft file: wire keys to values, e.g. `{"pname": "Shoe", "price": 50}`.
fn read_draft(path: &Path) -> Result<BTreeMap<ProductField, serde_json::Value>, String> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| format!("Cannot read {}: {}", path.display(), e))?;
    serde_json::from_str(&raw).map_err(|e| format!("Invalid draft {}: {}", path.display(), e))
}

/// Feed each value through the change and blur handlers, like a user typing
/// into the field and tabbing out.
fn apply_draft(form: &mut FormState, input: &BTreeMap<ProductField, serde_json::Value>) {
    for (field, value) in input {
        if !field.is_text() {
            tracing::warn!(%field, "Images are passed as a path argument, ignoring draft key");
            continue;
        }
        let value = match value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        form.handle_input(*field, value.as_str());
        form.handle_blur(*field, &value);
    }
}

fn select_image(form: &mut FormState, path: Option<&Path>) -> Result<(), String> {
    let Some(path) = path else {
        return Ok(());
    };
    let file =
        ImageFile::from_path(path).map_err(|e| format!("Cannot read {}: {}", path.display(), e))?;
    form.touch(ProductField::Image);
    // A rejected image shows up as a field error on submit.
    let _ = form.select_image(Some(file));
    Ok(())
}

fn report(form: &FormState, result: Result<Navigation, SubmitError>) -> Result<(), String> {
    match result {
        Ok(navigation) => {
            println!("{}", navigation.notice);
            println!("next: {}", navigation.route);
            Ok(())
        }
        Err(SubmitError::Invalid(_)) => {
            for field in ProductField::iter() {
                if let Some(message) = form.visible_error(field) {
                    eprintln!("  {}: {}", field, message);
                }
            }
            Err(SubmitError::Invalid(form.errors().clone()).to_string())
        }
        Err(e) => Err(e.to_string()),
    }
}
