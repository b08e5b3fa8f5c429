use std::path::PathBuf;
use thiserror::Error;

use crate::dom::ElementId;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("CLI argument parsing error: {0}")]
    CliArgs(#[from] clap::Error),

    #[error("Backend interaction error: {0}")]
    Api(#[from] ApiError),

    #[error("License form error: {0}")]
    Form(#[from] FormError),

    #[error("Document operation failed: {0}")]
    Dom(#[from] DomError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Action execution error: {0}")]
    Action(#[from] ActionError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to initialize logging: {0}")]
    Logging(String),
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Reqwest HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Backend HTTP error (Status: {status}): {body}")]
    Http {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Failed to deserialize backend response: {0}")]
    Deserialization(#[from] serde_json::Error),

    #[error("Invalid backend base URL: {0}")]
    InvalidBaseUrl(String),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomError {
    #[error("Element {0:?} does not belong to this document.")]
    UnknownElement(ElementId),

    #[error("The document body cannot be removed or re-parented.")]
    RootImmutable,

    #[error("Element {0:?} cannot be appended inside itself.")]
    HierarchyRequest(ElementId),
}

#[derive(Error, Debug)]
pub enum FormError {
    #[error("Required element '#{0}' is missing from the page.")]
    MissingElement(&'static str),

    #[error("The page carries no '{0}' attribute on its body.")]
    MissingAccessToken(&'static str),

    #[error("Submit trigger {0:?} is no longer attached to the page.")]
    DetachedTrigger(ElementId),

    #[error("Document operation failed: {0}")]
    Dom(#[from] DomError),

    #[error("Backend request failed: {0}")]
    Api(#[from] ApiError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file at '{1}': {0}")]
    Io(#[source] std::io::Error, PathBuf),

    #[error("Failed to parse config file '{1}': {0}")]
    Parse(#[source] serde_yaml::Error, PathBuf),
}

#[derive(Error, Debug)]
pub enum ActionError {
    #[error("Missing values for license parameters: {}", .0.join(", "))]
    MissingParameters(Vec<String>),

    #[error("Invalid parameter assignment '{0}', expected NAME=VALUE.")]
    InvalidParameter(String),

    #[error("No repositories given; pass at least one --repo ORG/REPO.")]
    NoRepositories,

    #[error("Submit trigger for '{0}' did not respond to the click.")]
    TriggerIgnored(String),

    #[error("License form reacted unexpectedly: {0}")]
    UnexpectedOutcome(String),
}
