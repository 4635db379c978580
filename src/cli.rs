//! Command handlers for the `promptlet` binary

use crate::{AppCommand, Commands, KeyCommand, ModelsCommand};
use anyhow::{Context, Result, anyhow, bail};
use promptlet::appearance::{AppliedAppearance, SystemPreference};
use promptlet::{AppState, Config, MiniApp, MiniAppForm, SettingsForm, StateStore, Theme};
use tracing::debug;

/// Dispatch a parsed command. No command means `show`.
pub fn run(command: Option<Commands>) -> Result<()> {
    let config = Config::load()?;
    let command = command.unwrap_or(Commands::Show {
        reveal: false,
        json: false,
    });

    match command {
        Commands::Config { path } => cmd_config(&config, path),
        Commands::Show { reveal, json } => {
            let (store, appearance) = open_store(&config)?;
            cmd_show(store.state(), &appearance, reveal, json)
        }
        Commands::Key { action } => cmd_key(&mut open_store(&config)?.0, action),
        Commands::Models { action } => cmd_models(&mut open_store(&config)?.0, action),
        Commands::App { action } => cmd_app(&mut open_store(&config)?.0, action),
        Commands::Theme { theme } => {
            let (mut store, appearance) = open_store(&config)?;
            store.set_theme(theme);
            ensure_saved(&mut store)?;
            print_theme(theme, &appearance);
            Ok(())
        }
    }
}

fn open_store(config: &Config) -> Result<(StateStore, AppliedAppearance)> {
    let storage = config.storage();
    debug!(path = %storage.path().display(), "Opening state store");

    let appearance = AppliedAppearance::new();
    let mut store = StateStore::builder(storage)
        .theme_effect(appearance.clone())
        .system_preference(SystemPreference::new(config.system_prefers_dark))
        .build();

    // Refuse to run on top of defaults when existing state could not be read
    if let Some(e) = store.take_storage_error() {
        return Err(anyhow::Error::new(e).context("Failed to open state"));
    }
    Ok((store, appearance))
}

fn ensure_saved(store: &mut StateStore) -> Result<()> {
    match store.take_storage_error() {
        Some(e) => Err(anyhow::Error::new(e).context("Changes were not saved")),
        None => Ok(()),
    }
}

fn cmd_config(config: &Config, path: bool) -> Result<()> {
    if path {
        println!("{}", Config::default_path().display());
    } else {
        let json = serde_json::to_string_pretty(config).context("Failed to serialize config")?;
        println!("{json}");
    }
    Ok(())
}

fn cmd_show(
    state: &AppState,
    appearance: &AppliedAppearance,
    reveal: bool,
    json: bool,
) -> Result<()> {
    if json {
        let mut value: serde_json::Value =
            serde_json::from_str(&state.to_blob().context("Failed to serialize state")?)?;
        if !reveal
            && let Some(key) = value.get_mut("apiKey")
            && let Some(masked) = key.as_str().map(mask_key)
        {
            *key = serde_json::Value::String(masked);
        }
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let key = match state.api_key.as_deref() {
        Some(key) if reveal => key.to_string(),
        Some(key) => mask_key(key),
        None => "not set".to_string(),
    };
    let saved = if state.save_api_key { "saved" } else { "session only" };
    println!("API key:    {key} ({saved})");

    print_theme(state.theme, appearance);

    match (&state.active_mini_app_id, state.active_mini_app()) {
        (_, Some(app)) => println!("Active app: {} ({})", app.name, app.short_id()),
        (Some(id), None) => println!("Active app: {id} (missing)"),
        (None, None) => println!("Active app: none"),
    }
    println!("Mini-apps:  {}", state.mini_apps.len());
    println!("Models:     {}", state.models.len());
    Ok(())
}

fn print_theme(theme: Theme, appearance: &AppliedAppearance) {
    match appearance.current() {
        Some(applied) => println!("Theme:      {theme} ({applied})"),
        None => println!("Theme:      {theme}"),
    }
}

fn cmd_key(store: &mut StateStore, action: KeyCommand) -> Result<()> {
    let mut form = SettingsForm::from_state(store.state());
    match action {
        KeyCommand::Set { key, no_save } => {
            form.api_key = key;
            form.save_api_key = !no_save;
        }
        KeyCommand::Clear => form.api_key.clear(),
    }
    form.submit(store)?;
    ensure_saved(store)?;

    match store.state().api_key.as_deref() {
        Some(key) if store.state().save_api_key => println!("API key set: {}", mask_key(key)),
        Some(key) => println!("API key set for this session only: {}", mask_key(key)),
        None => println!("API key cleared"),
    }
    Ok(())
}

fn cmd_models(store: &mut StateStore, action: ModelsCommand) -> Result<()> {
    let mut form = SettingsForm::from_state(store.state());
    match action {
        ModelsCommand::List => {
            for option in &form.models {
                println!("{}\t{}", option.identifier, option.label);
            }
            return Ok(());
        }
        ModelsCommand::Add { id, label } => {
            form.add_model_row();
            let row = form.models.len() - 1;
            form.update_model_row(row, Some(&id), Some(&label));
            form.submit(store)?;
            ensure_saved(store)?;
            println!("Added model {id}");
        }
        ModelsCommand::Remove { id } => {
            let row = form
                .models
                .iter()
                .position(|option| option.identifier == id)
                .ok_or_else(|| anyhow!("no model option '{id}'"))?;
            form.remove_model_row(row);
            form.submit(store)?;
            ensure_saved(store)?;
            println!("Removed model {id}");
        }
        ModelsCommand::Reset => {
            form.reset_models();
            form.submit(store)?;
            ensure_saved(store)?;
            println!("Restored {} built-in models", store.state().models.len());
        }
    }
    Ok(())
}

fn cmd_app(store: &mut StateStore, action: AppCommand) -> Result<()> {
    match action {
        AppCommand::List => {
            let state = store.state();
            if state.mini_apps.is_empty() {
                println!("No mini-apps.");
            }
            for app in &state.mini_apps {
                let marker = if state.active_mini_app_id.as_deref() == Some(app.id.as_str()) {
                    '*'
                } else {
                    ' '
                };
                println!("{marker} {}  {}  [{}]", app.short_id(), app.name, app.model);
            }
        }
        AppCommand::Add {
            name,
            model,
            prompt,
        } => {
            let mut form = MiniAppForm::new(store.state());
            form.name = name;
            if let Some(model) = model {
                form.model = model;
            }
            if let Some(prompt) = prompt {
                form.system_prompt = prompt;
            }
            let id = form.submit(store)?;
            ensure_saved(store)?;
            println!("Created mini-app {id}");
        }
        AppCommand::Edit {
            id,
            name,
            model,
            prompt,
        } => {
            let app = resolve_app(store.state(), &id)?;
            let mut form = MiniAppForm::edit(&app);
            if let Some(name) = name {
                form.name = name;
            }
            if let Some(model) = model {
                form.model = model;
            }
            if let Some(prompt) = prompt {
                form.system_prompt = prompt;
            }
            let id = form.submit(store)?;
            ensure_saved(store)?;
            println!("Updated mini-app {id}");
        }
        AppCommand::Delete { id } => {
            let app = resolve_app(store.state(), &id)?;
            store.delete_mini_app(&app.id);
            ensure_saved(store)?;
            println!("Deleted mini-app {} ({})", app.name, app.short_id());
        }
        AppCommand::Use { id } => {
            let app = resolve_app(store.state(), &id)?;
            store.set_active_mini_app_id(Some(app.id.clone()));
            ensure_saved(store)?;
            println!("Selected mini-app {} ({})", app.name, app.short_id());
        }
        AppCommand::Deselect => {
            store.set_active_mini_app_id(None);
            ensure_saved(store)?;
            println!("Selection cleared");
        }
    }
    Ok(())
}

fn resolve_app(state: &AppState, id_or_prefix: &str) -> Result<MiniApp> {
    if let Some(app) = state.find_mini_app(id_or_prefix) {
        return Ok(app.clone());
    }
    if state
        .mini_apps
        .iter()
        .filter(|app| app.id.starts_with(id_or_prefix))
        .nth(1)
        .is_some()
    {
        bail!("mini-app id '{id_or_prefix}' is ambiguous");
    }
    bail!("no mini-app matches '{id_or_prefix}'")
}

/// Show only the last four characters of a key
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{tail}")
}
