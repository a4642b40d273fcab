use std::time::Instant;

use anyhow::Result;
use maxlaunchpad::{system::SystemRunner, Installer};

use super::{print_warnings, Session};

pub fn cmd_download(session: &Session) -> Result<()> {
    let config = session.load_config()?;
    let fetcher = Session::fetcher(&config)?;
    let artifact = maxlaunchpad::fetch::Artifact::from_package(&config.package)?;

    let started = Instant::now();
    let path = fetcher.fetch(&artifact)?;
    eprintln!(
        "Verified {} {} in {}",
        config.package.name,
        artifact.version,
        humantime::format_duration(std::time::Duration::from_secs(started.elapsed().as_secs()))
    );
    println!("{}", path.display());
    Ok(())
}

pub fn cmd_install(session: &Session) -> Result<()> {
    let config = session.load_config()?;
    let host = session.host(&config)?;
    let installer = Installer::new(&config, &host, &SystemRunner, Session::fetcher(&config)?);

    eprintln!("Installing {} {}…", config.package.name, config.package.version);
    let summary = installer.install()?;
    print_warnings(&summary.report);

    eprintln!("Installed {}", summary.bundle.path.display());
    eprintln!(
        "Added {} to login items ({} mechanism).",
        config.login_item.name, summary.registration.mechanism
    );
    eprintln!();
    print!("{}", installer.caveats());
    Ok(())
}

pub fn cmd_uninstall(session: &Session) -> Result<()> {
    let config = session.load_config()?;
    let host = session.host(&config)?;
    let installer = Installer::new(&config, &host, &SystemRunner, Session::fetcher(&config)?);

    let report = installer.uninstall();
    print_warnings(&report);
    eprintln!("Uninstalled {} and removed its login item.", config.package.name);
    Ok(())
}

pub fn cmd_zap(session: &Session) -> Result<()> {
    let config = session.load_config()?;
    let host = session.host(&config)?;
    let installer = Installer::new(&config, &host, &SystemRunner, Session::fetcher(&config)?);

    let report = installer.zap();
    print_warnings(&report);
    eprintln!("Removed {} and all of its user data.", config.package.name);
    Ok(())
}

pub fn cmd_test(session: &Session) -> Result<()> {
    let config = session.load_config()?;
    let host = session.host(&config)?;
    let installer = Installer::new(&config, &host, &SystemRunner, Session::fetcher(&config)?);

    installer.test()?;
    println!("{} installation looks good.", config.package.name);
    Ok(())
}

pub fn cmd_caveats(session: &Session) -> Result<()> {
    let config = session.load_config()?;
    let host = session.host(&config)?;
    let installer = Installer::new(&config, &host, &SystemRunner, Session::fetcher(&config)?);

    print!("{}", installer.caveats());
    Ok(())
}
