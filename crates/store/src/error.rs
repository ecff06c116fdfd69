use queue_depth::Error;

/// Sorts a driver error into the two fatal store classes: the database could
/// not be reached at all, or it was reached and the query failed.
pub fn store_error(err: sqlx::Error) -> Error {
  match err {
    sqlx::Error::Io(_)
    | sqlx::Error::Tls(_)
    | sqlx::Error::PoolTimedOut
    | sqlx::Error::PoolClosed
    | sqlx::Error::WorkerCrashed
    | sqlx::Error::Configuration(_) => Error::store_unavailable(err),
    _ => Error::query_failed(err),
  }
}

/// Hides the password of a connection url before it is logged.
pub fn mask_password(url: &str) -> String {
  let Some((scheme, rest)) = url.split_once("://") else {
    return url.to_string();
  };

  let Some((credentials, host)) = rest.rsplit_once('@') else {
    return url.to_string();
  };

  match credentials.split_once(':') {
    Some((user, _)) => format!("{}://{}:****@{}", scheme, user, host),
    None => url.to_string(),
  }
}
