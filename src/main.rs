use {color_eyre::eyre::Result, themekit::app::ThemeKitApp};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let app = ThemeKitApp::init()?;
    app.run().await
}
