mod bulk_revocation;
mod delegation;
