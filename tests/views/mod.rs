mod confirmation;
mod paginator;
