//! The XSL stylesheet rendering sitemap documents as a readable table.
//!
//! Served verbatim at `/sitemap.xsl`; every generated document points its
//! xml-stylesheet processing instruction here. The template handles both
//! urlset documents (with news/image/video annotations) and the
//! sitemapindex document.

pub const SITEMAP_STYLESHEET: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<xsl:stylesheet version="2.0"
                xmlns:xsl="http://www.w3.org/1999/XSL/Transform"
                xmlns:sitemap="http://www.sitemaps.org/schemas/sitemap/0.9"
                xmlns:news="http://www.google.com/schemas/sitemap-news/0.9"
                xmlns:image="http://www.google.com/schemas/sitemap-image/1.1"
                xmlns:video="http://www.google.com/schemas/sitemap-video/1.1">
    <xsl:output method="html" version="1.0" encoding="UTF-8" indent="yes"/>
    <xsl:template match="/">
        <html xmlns="http://www.w3.org/1999/xhtml">
            <head>
                <title>XML Sitemap</title>
                <meta http-equiv="Content-Type" content="text/html; charset=utf-8" />
                <style type="text/css">
                    body {
                        font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
                        color: #24292f;
                        background: #f6f8fa;
                        margin: 0;
                        padding: 24px;
                    }
                    .container {
                        max-width: 1080px;
                        margin: 0 auto;
                        background: #ffffff;
                        border: 1px solid #d0d7de;
                        border-radius: 6px;
                        overflow: hidden;
                    }
                    .header {
                        padding: 20px 28px;
                        border-bottom: 1px solid #d0d7de;
                    }
                    .header h1 {
                        margin: 0;
                        font-size: 22px;
                        font-weight: 600;
                    }
                    .header p {
                        margin: 6px 0 0 0;
                        color: #57606a;
                        font-size: 14px;
                    }
                    .stats {
                        display: flex;
                        gap: 28px;
                        padding: 14px 28px;
                        background: #f6f8fa;
                        border-bottom: 1px solid #d0d7de;
                        font-size: 13px;
                        color: #57606a;
                    }
                    .stat b {
                        color: #24292f;
                        margin-right: 4px;
                    }
                    table {
                        width: 100%;
                        border-collapse: collapse;
                    }
                    th {
                        text-align: left;
                        padding: 10px 28px;
                        font-size: 13px;
                        color: #57606a;
                        border-bottom: 1px solid #d0d7de;
                    }
                    td {
                        padding: 10px 28px;
                        font-size: 14px;
                        border-bottom: 1px solid #eaeef2;
                        vertical-align: top;
                    }
                    tr:hover td {
                        background: #f6f8fa;
                    }
                    a.loc {
                        color: #0969da;
                        text-decoration: none;
                        word-break: break-all;
                    }
                    a.loc:hover {
                        text-decoration: underline;
                    }
                    .annotation {
                        margin-top: 4px;
                        font-size: 12px;
                        color: #57606a;
                    }
                    .lastmod {
                        width: 190px;
                        color: #57606a;
                        white-space: nowrap;
                    }
                    .narrow {
                        width: 90px;
                        text-align: center;
                    }
                </style>
            </head>
            <body>
                <div class="container">
                    <div class="header">
                        <h1>XML Sitemap</h1>
                        <p>This document is consumed by search engines; the table below is a readable rendering.</p>
                    </div>
                    <xsl:choose>
                        <xsl:when test="//sitemap:url">
                            <div class="stats">
                                <span class="stat"><b><xsl:value-of select="count(//sitemap:url)"/></b> URLs</span>
                                <span class="stat"><b><xsl:value-of select="count(//image:image)"/></b> images</span>
                                <span class="stat"><b><xsl:value-of select="count(//news:news)"/></b> news entries</span>
                                <span class="stat"><b><xsl:value-of select="count(//video:video)"/></b> videos</span>
                            </div>
                            <table>
                                <tr>
                                    <th>URL</th>
                                    <th class="narrow">Images</th>
                                    <th>Last modified</th>
                                    <th class="narrow">Priority</th>
                                </tr>
                                <xsl:for-each select="//sitemap:url">
                                    <tr>
                                        <td>
                                            <a href="{sitemap:loc}" class="loc">
                                                <xsl:value-of select="sitemap:loc"/>
                                            </a>
                                            <xsl:if test="news:news">
                                                <div class="annotation">
                                                    News: <xsl:value-of select="news:news/news:title"/>
                                                </div>
                                            </xsl:if>
                                            <xsl:if test="video:video">
                                                <div class="annotation">
                                                    Video: <xsl:value-of select="video:video/video:title"/>
                                                </div>
                                            </xsl:if>
                                        </td>
                                        <td class="narrow">
                                            <xsl:value-of select="count(image:image)"/>
                                        </td>
                                        <td class="lastmod">
                                            <xsl:value-of select="sitemap:lastmod"/>
                                        </td>
                                        <td class="narrow">
                                            <xsl:value-of select="sitemap:priority"/>
                                        </td>
                                    </tr>
                                </xsl:for-each>
                            </table>
                        </xsl:when>
                        <xsl:otherwise>
                            <div class="stats">
                                <span class="stat"><b><xsl:value-of select="count(//sitemap:sitemap)"/></b> sitemaps</span>
                            </div>
                            <table>
                                <tr>
                                    <th>Sitemap</th>
                                    <th>Last modified</th>
                                </tr>
                                <xsl:for-each select="sitemap:sitemapindex/sitemap:sitemap">
                                    <tr>
                                        <td>
                                            <a href="{sitemap:loc}" class="loc">
                                                <xsl:value-of select="sitemap:loc"/>
                                            </a>
                                        </td>
                                        <td class="lastmod">
                                            <xsl:value-of select="sitemap:lastmod"/>
                                        </td>
                                    </tr>
                                </xsl:for-each>
                            </table>
                        </xsl:otherwise>
                    </xsl:choose>
                </div>
            </body>
        </html>
    </xsl:template>
</xsl:stylesheet>
"#;
