mod common;
mod contraindications;
mod interactions;
mod routing;
