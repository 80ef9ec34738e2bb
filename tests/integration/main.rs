mod helpers;
mod test_auth_flows;
mod test_engagement_flows;
mod test_moderation_flows;
mod test_postgres_store;
