use std::fmt::Write;

/// Generates matching nanopore and bisulfite reports with a deterministic
/// layout.
///
/// Every chromosome gets `sites` nanopore records at starts `10 * i`. Every
/// `bis_every`-th site has a bisulfite record, and one extra bisulfite
/// record per chromosome sits at a position with no nanopore call.
pub struct DemoReportBuilder {
    pub chromosomes: Vec<String>,
    pub sites:       u32,
    pub bis_every:   u32,
}

#[allow(dead_code)]
pub struct DemoSite {
    pub chromosome:  String,
    pub start:       u32,
    pub ont_percent: f64,
    pub ont_reads:   u32,
    pub bis_percent: Option<f64>,
    pub bis_reads:   u32,
}

impl DemoReportBuilder {
    pub fn new(
        chromosomes: &[&str],
        sites: u32,
        bis_every: u32,
    ) -> Self {
        Self {
            chromosomes: chromosomes.iter().map(|c| c.to_string()).collect(),
            sites,
            bis_every,
        }
    }

    pub fn sites(&self) -> Vec<DemoSite> {
        let mut out = Vec::new();
        for (c, chr) in self.chromosomes.iter().enumerate() {
            for i in 0..self.sites {
                let seed = i + 7 * c as u32;
                let ont_percent = (seed * 37 % 1001) as f64 / 10.0;
                let ont_reads = 20 + seed % 15;
                let has_bis = i % self.bis_every == 0;
                out.push(DemoSite {
                    chromosome: chr.clone(),
                    start: 10 * i,
                    ont_percent,
                    ont_reads,
                    bis_percent: has_bis.then(|| (seed * 53 % 1001) as f64 / 10.0),
                    bis_reads: 20 + seed % 11,
                });
            }
        }
        out
    }

    pub fn nanopore_report(&self) -> String {
        let mut out = String::new();
        for site in self.sites() {
            let modified = site.ont_reads / 2;
            let canonical = site.ont_reads - modified;
            writeln!(
                out,
                "{}\t{}\t{}\tm\t1000\t+\t{}\t{}\t255,0,0\t{}\t{}\t{}\t{}\t0\t0\t0\t0\t0",
                site.chromosome,
                site.start,
                site.start + 1,
                site.start,
                site.start + 1,
                site.ont_reads,
                site.ont_percent,
                canonical,
                modified
            )
            .unwrap();
        }
        out
    }

    pub fn bisulfite_report(&self) -> String {
        let mut out = String::new();
        for site in self.sites() {
            if let Some(percent) = site.bis_percent {
                let modified = site.bis_reads / 3;
                let canonical = site.bis_reads - modified;
                writeln!(
                    out,
                    "{}\t{}\t{}\t{}\t{}\t{}",
                    site.chromosome,
                    site.start,
                    site.start,
                    percent,
                    modified,
                    canonical
                )
                .unwrap();
            }
        }
        for chr in &self.chromosomes {
            writeln!(out, "{chr}\t5\t5\t50.0\t20\t20").unwrap();
        }
        out
    }
}
