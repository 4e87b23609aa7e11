/// Values collected from the user for one deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentParams {
    pub account: String,
    pub repository: String,
    pub commit_message: String,
}

impl DeploymentParams {
    /// Clone URL registered as the remote, e.g. `https://github.com/me/docs.git`.
    pub fn remote_url(&self, git_host: &str) -> String {
        format!("{}.git", self.repository_url(git_host))
    }

    pub fn repository_url(&self, git_host: &str) -> String {
        format!("https://{}/{}/{}", git_host, self.account, self.repository)
    }

    /// Where the hosting provider serves the site.
    pub fn pages_url(&self, pages_host: &str) -> String {
        format!("https://{}.{}/{}", self.account, pages_host, self.repository)
    }
}
