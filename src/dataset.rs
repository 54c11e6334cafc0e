use crate::{
    DashboardResult, FileExtension, SourceConfig, TableKind, add_division_columns, merge_tables,
};
use polars::prelude::*;
use std::{path::PathBuf, sync::Arc};

/// Immutable snapshot of the loaded data, shared read-only by every page.
///
/// Built once at startup (and again on File > Reload). Never written back.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Season-stat table as read from disk.
    pub performance: Arc<DataFrame>,
    /// Biographical table as read from disk.
    pub biographical: Arc<DataFrame>,
    /// Merged and enriched table used by every analysis page.
    pub merged: Arc<DataFrame>,
    /// Where the tables were read from.
    pub config: Arc<SourceConfig>,
}

impl Dataset {
    /// Loads both sources, joins them and adds `Division`/`Conference`.
    pub async fn load(config: SourceConfig) -> DashboardResult<Self> {
        tracing::debug!("fn Dataset::load()\nconfig: {config:#?}");

        let sources = config.load_sources().await?;

        let merged = merge_tables(&sources.performance, &sources.biographical)?;
        let merged = add_division_columns(merged)?;

        tracing::info!("Dataset ready. Merged shape: {:?}", merged.shape());

        Ok(Self::from_parts(
            sources.performance,
            sources.biographical,
            merged,
            config,
        ))
    }

    /// Wraps already prepared tables.
    pub fn from_parts(
        performance: DataFrame,
        biographical: DataFrame,
        merged: DataFrame,
        config: SourceConfig,
    ) -> Self {
        Dataset {
            performance: Arc::new(performance),
            biographical: Arc::new(biographical),
            merged: Arc::new(merged),
            config: Arc::new(config),
        }
    }

    /// Source file and detected format of a table.
    pub fn source(&self, kind: TableKind) -> (PathBuf, FileExtension) {
        let path = self.config.path(kind);
        (path.to_path_buf(), FileExtension::from_path(path))
    }
}

//----------------------------------------------------------------------------//
//                                   Tests                                    //
//----------------------------------------------------------------------------//

/// Run tests with:
/// cargo test -- --show-output tests_dataset
#[cfg(test)]
mod tests_dataset {
    use super::*;
    use crate::DashboardError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> DashboardResult<NamedTempFile> {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile()?;
        file.write_all(content.as_bytes())?;
        file.flush()?;
        Ok(file)
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_load_merges_and_enriches() -> DashboardResult<()> {
        let bio = write_csv(
            "\
Player,Ctry,Ht,Wt,Draft Yr,Round,Overall
Morgan Rielly,CAN,73,218,2012,1,5
Mike Matheson,CAN,74,196,2012,1,23
Zach Werenski,USA,74,210,2015,1,8",
        )?;
        let season = write_csv(
            "\
Player,Season,Team,S/C,Pos,GP,G,A,P,+/-,PIM,S%,TOI/GP
Morgan Rielly,20232024,TOR,L,D,72,7,51,58,3,72,4.3,24:09
Mike Matheson,20232024,MTL,L,D,82,11,51,62,-20,57,5.9,25:32
Zach Werenski,20232024,CBJ,L,D,70,11,46,57,-15,24,5.2,24:43",
        )?;

        let config = SourceConfig {
            bio_path: bio.path().to_path_buf(),
            season_path: season.path().to_path_buf(),
            ..Default::default()
        };

        let dataset = Dataset::load(config).await?;
        let merged = &dataset.merged;
        println!("{merged}");

        // 13 performance columns - 3 dropped + 6 biographical + 2 derived.
        assert_eq!(merged.shape(), (3, 13 - 3 + 6 + 2));
        assert!(!merged.schema().contains("Position"));
        assert!(!merged.schema().contains("Shooting%"));

        let divisions: Vec<Option<&str>> = merged
            .column("Division")?
            .as_materialized_series()
            .str()?
            .into_iter()
            .collect();
        assert_eq!(divisions, [Some("ATL"), Some("ATL"), Some("MET")]);

        let conferences: Vec<Option<&str>> = merged
            .column("Conference")?
            .as_materialized_series()
            .str()?
            .into_iter()
            .collect();
        assert_eq!(conferences, [Some("EC"), Some("EC"), Some("EC")]);

        let (path, format) = dataset.source(TableKind::Biographical);
        assert_eq!(path, bio.path());
        assert_eq!(format, FileExtension::Csv);
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_load_rejects_misaligned_rows() -> DashboardResult<()> {
        let bio = write_csv(
            "\
Player,Ctry,Ht,Wt,Draft Yr,Round,Overall
Morgan Rielly,CAN,73,218,2012,1,5",
        )?;
        let season = write_csv(
            "\
Player,Team,GP
Morgan Rielly,TOR,72
Mike Matheson,MTL,82",
        )?;

        let config = SourceConfig {
            bio_path: bio.path().to_path_buf(),
            season_path: season.path().to_path_buf(),
            ..Default::default()
        };

        let result = Dataset::load(config).await;
        assert!(matches!(
            result,
            Err(DashboardError::RowCountMismatch { .. })
        ));
        Ok(())
    }
}
